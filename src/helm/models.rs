//! Structured records returned by `--output json` commands.

use serde::Deserialize;

/// One table row, cells in column order.
pub type Row = Vec<String>;

/// Conversion of a structured record into table cells.
pub trait IntoRow {
    fn into_row(self) -> Row;
}

/// `helm ls --output json`
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    pub revision: String,
    pub updated: String,
    pub status: String,
    pub chart: String,
    pub app_version: String,
}

impl IntoRow for Release {
    fn into_row(self) -> Row {
        vec![
            self.name,
            self.namespace,
            self.revision,
            self.updated,
            self.status,
            self.chart,
            self.app_version,
        ]
    }
}

/// `helm history --output json`
#[derive(Debug, Clone, Deserialize)]
pub struct Revision {
    pub revision: i64,
    pub updated: String,
    pub status: String,
    pub chart: String,
    pub app_version: String,
    #[serde(default)]
    pub description: String,
}

impl IntoRow for Revision {
    fn into_row(self) -> Row {
        vec![
            self.revision.to_string(),
            self.updated,
            self.status,
            self.chart,
            self.app_version,
            self.description,
        ]
    }
}

/// `helm repo ls --output json`
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

impl IntoRow for Repository {
    fn into_row(self) -> Row {
        vec![self.name, self.url]
    }
}

/// `helm search repo --output json`
#[derive(Debug, Clone, Deserialize)]
pub struct ChartVersion {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub description: String,
}

/// Catalog search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct HubPackage {
    pub package_id: String,
    pub normalized_name: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    pub repository: HubRepository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HubRepository {
    pub name: String,
    pub url: String,
}

impl IntoRow for HubPackage {
    fn into_row(self) -> Row {
        vec![
            self.package_id,
            self.version,
            self.normalized_name,
            self.repository.name,
            self.repository.url,
            self.description,
        ]
    }
}
