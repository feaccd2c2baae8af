//! Every helm invocation the UI issues, with its argv and output decoder.

use super::models::{ChartVersion, Release, Repository, Revision};
use super::parse::{self, PLUGIN_LIST};
use super::{HelmError, Payload};
use std::path::PathBuf;

/// Text documents attached to a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GetKind {
    Notes,
    Metadata,
    Hooks,
    Values,
    Manifest,
}

impl GetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GetKind::Notes => "notes",
            GetKind::Metadata => "metadata",
            GetKind::Hooks => "hooks",
            GetKind::Values => "values",
            GetKind::Manifest => "manifest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelmCommand {
    // Releases
    ListReleases,
    History { release: String, namespace: String },
    Get { kind: GetKind, release: String, namespace: String },
    Uninstall { release: String, namespace: String },
    Rollback { release: String, namespace: String, revision: String },
    Install {
        release: String,
        chart: String,
        version: String,
        namespace: String,
        values: Option<PathBuf>,
    },
    Upgrade {
        release: String,
        chart: String,
        version: String,
        namespace: String,
        values: Option<PathBuf>,
    },
    ShowValues { chart: String, version: String },

    // Charts
    SearchCharts { query: String },
    SearchVersions { chart: String },
    ChartVersions { chart: String },
    RepoPackages { repo: String },

    // Repositories
    RepoList,
    RepoAdd { name: String, url: String },
    RepoRemove { name: String },
    RepoUpdate { name: String },

    // Plugins
    PluginList,
    PluginInstall { source: String },
    PluginUpdate { name: String },
    PluginUninstall { name: String },
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

/// Exact-match regexp understood by `helm search repo --regexp`.
fn exact(chart: &str) -> String {
    format!("\\v{}\\v", chart)
}

impl HelmCommand {
    /// Commands that change cluster or local helm state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            HelmCommand::Uninstall { .. }
                | HelmCommand::Rollback { .. }
                | HelmCommand::Install { .. }
                | HelmCommand::Upgrade { .. }
                | HelmCommand::RepoAdd { .. }
                | HelmCommand::RepoRemove { .. }
                | HelmCommand::RepoUpdate { .. }
                | HelmCommand::PluginInstall { .. }
                | HelmCommand::PluginUpdate { .. }
                | HelmCommand::PluginUninstall { .. }
        )
    }

    /// Arguments passed to the helm binary.
    pub fn argv(&self) -> Vec<String> {
        match self {
            HelmCommand::ListReleases => args(["ls", "--all-namespaces", "--output", "json"]),
            HelmCommand::History { release, namespace } => {
                args(["history", release, "--namespace", namespace, "--output", "json"])
            }
            HelmCommand::Get { kind, release, namespace } => {
                args(["get", kind.as_str(), release, "--namespace", namespace])
            }
            HelmCommand::Uninstall { release, namespace } => args(["uninstall", release, "--namespace", namespace]),
            HelmCommand::Rollback {
                release,
                namespace,
                revision,
            } => args(["rollback", release, revision, "--namespace", namespace]),
            HelmCommand::Install {
                release,
                chart,
                version,
                namespace,
                values,
            } => {
                let mut argv = args(["install", release, chart]);
                push_release_options(&mut argv, version, values);
                argv.extend(args(["--namespace", namespace, "--create-namespace"]));
                argv
            }
            HelmCommand::Upgrade {
                release,
                chart,
                version,
                namespace,
                values,
            } => {
                let mut argv = args(["upgrade", release, chart]);
                push_release_options(&mut argv, version, values);
                argv.extend(args(["--namespace", namespace]));
                argv
            }
            HelmCommand::ShowValues { chart, version } => {
                let mut argv = args(["show", "values", chart]);
                if !version.is_empty() {
                    argv.extend(args(["--version", version]));
                }
                argv
            }
            HelmCommand::SearchCharts { query } => args(["search", "repo", query, "--output", "json"]),
            HelmCommand::SearchVersions { chart } | HelmCommand::ChartVersions { chart } => args([
                "search",
                "repo",
                "--regexp",
                &exact(chart),
                "--versions",
                "--output",
                "json",
            ]),
            HelmCommand::RepoPackages { repo } => args(["search", "repo", &format!("{}/", repo), "--output", "json"]),
            HelmCommand::RepoList => args(["repo", "ls", "--output", "json"]),
            HelmCommand::RepoAdd { name, url } => args(["repo", "add", name, url]),
            HelmCommand::RepoRemove { name } => args(["repo", "remove", name]),
            HelmCommand::RepoUpdate { name } => args(["repo", "update", name]),
            HelmCommand::PluginList => args(["plugin", "ls"]),
            HelmCommand::PluginInstall { source } => args(["plugin", "install", source]),
            HelmCommand::PluginUpdate { name } => args(["plugin", "update", name]),
            HelmCommand::PluginUninstall { name } => args(["plugin", "uninstall", name]),
        }
    }

    /// Turn captured stdout into the payload the target surface expects.
    pub fn decode(&self, stdout: &str) -> Result<Payload, HelmError> {
        match self {
            HelmCommand::ListReleases => parse::parse_json::<Release>(stdout, "release list").map(Payload::Rows),
            HelmCommand::History { .. } => parse::parse_json::<Revision>(stdout, "release history").map(Payload::Rows),
            HelmCommand::Get {
                kind: GetKind::Values, ..
            } => Ok(Payload::Text(parse::strip_first_line(stdout))),
            HelmCommand::Get { .. } | HelmCommand::ShowValues { .. } => Ok(Payload::Text(stdout.to_string())),
            HelmCommand::SearchCharts { .. } => {
                let charts = parse::parse_records::<ChartVersion>(stdout, "chart search")?;
                Ok(Payload::Suggestions(charts.into_iter().map(|c| c.name).collect()))
            }
            HelmCommand::SearchVersions { .. } => {
                let charts = parse::parse_records::<ChartVersion>(stdout, "chart versions")?;
                Ok(Payload::Suggestions(charts.into_iter().map(|c| c.version).collect()))
            }
            HelmCommand::ChartVersions { .. } => {
                let charts = parse::parse_records::<ChartVersion>(stdout, "chart versions")?;
                Ok(Payload::Rows(
                    charts
                        .into_iter()
                        .map(|c| vec![c.version, c.app_version, c.description])
                        .collect(),
                ))
            }
            HelmCommand::RepoPackages { .. } => {
                let charts = parse::parse_records::<ChartVersion>(stdout, "repository packages")?;
                Ok(Payload::Rows(charts.into_iter().map(|c| vec![c.name]).collect()))
            }
            HelmCommand::RepoList => parse::parse_json::<Repository>(stdout, "repository list").map(Payload::Rows),
            HelmCommand::PluginList => parse::parse_table(stdout, &PLUGIN_LIST).map(Payload::Rows),
            HelmCommand::Uninstall { .. }
            | HelmCommand::Rollback { .. }
            | HelmCommand::Install { .. }
            | HelmCommand::Upgrade { .. }
            | HelmCommand::RepoAdd { .. }
            | HelmCommand::RepoRemove { .. }
            | HelmCommand::RepoUpdate { .. }
            | HelmCommand::PluginInstall { .. }
            | HelmCommand::PluginUpdate { .. }
            | HelmCommand::PluginUninstall { .. } => Ok(Payload::Done(stdout.trim().to_string())),
        }
    }
}

fn push_release_options(argv: &mut Vec<String>, version: &str, values: &Option<PathBuf>) {
    if !version.is_empty() {
        argv.extend(args(["--version", version]));
    }
    if let Some(path) = values {
        argv.push("--values".to_string());
        argv.push(path.display().to_string());
    }
}
