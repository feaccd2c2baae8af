//! Artifact Hub catalog client.

use crate::helm::models::{HubPackage, IntoRow};
use crate::helm::{HelmError, Payload};
use async_trait::async_trait;
use serde::Deserialize;

/// Catalog lookups issued by the Hub tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Search { query: String },
    DefaultValues { package_id: String, version: String },
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<HubPackage>, HelmError>;
    async fn default_values(&self, package_id: &str, version: &str) -> Result<String, HelmError>;
}

/// Run a catalog query and wrap the response as a payload.
pub async fn execute(client: &dyn CatalogClient, query: &CatalogQuery) -> Result<Payload, HelmError> {
    match query {
        CatalogQuery::Search { query } => {
            let packages = client.search(query).await?;
            Ok(Payload::Rows(packages.into_iter().map(IntoRow::into_row).collect()))
        }
        CatalogQuery::DefaultValues { package_id, version } => {
            client.default_values(package_id, version).await.map(Payload::Text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    packages: Vec<HubPackage>,
}

pub struct ArtifactHubClient {
    http: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl ArtifactHubClient {
    pub fn new(base_url: impl Into<String>, limit: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limit,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/api/v1/packages/search", self.base_url)
    }
}

fn request_error(e: reqwest::Error) -> HelmError {
    HelmError::Catalog(e.to_string())
}

#[async_trait]
impl CatalogClient for ArtifactHubClient {
    async fn search(&self, query: &str) -> Result<Vec<HubPackage>, HelmError> {
        log::info!("Catalog: searching for '{}'", query);
        let limit = self.limit.to_string();
        let response = self
            .http
            .get(self.search_url())
            .query(&[
                ("offset", "0"),
                ("limit", limit.as_str()),
                ("facets", "false"),
                ("ts_query_web", query),
                ("kind", "0"),
                ("deprecated", "false"),
                ("sort", "relevance"),
            ])
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;

        let body: SearchResponse = response.json().await.map_err(|e| HelmError::Parse {
            what: "catalog search",
            reason: e.to_string(),
        })?;
        Ok(body.packages)
    }

    async fn default_values(&self, package_id: &str, version: &str) -> Result<String, HelmError> {
        let url = format!("{}/api/v1/packages/{}/{}/values", self.base_url, package_id, version);
        self.http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/yaml")
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?
            .text()
            .await
            .map_err(request_error)
    }
}
