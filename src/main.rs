use anyhow::{Context, Result};
use helmtui::catalog::ArtifactHubClient;
use helmtui::config::Config;
use helmtui::helm::ProcessRunner;
use helmtui::logger::Logger;
use helmtui::ui::core::TabContext;
use helmtui::workspace::Workspace;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let workspace = Workspace::acquire().context("Cannot start without a working directory")?;

    let config = Config::load()?;
    let logger = Logger::from_config(&config.logging, &workspace.log_file());
    logger.install()?;
    log::info!("helmtui starting, helm binary '{}'", config.helm.binary);

    let runner = Arc::new(ProcessRunner::new(config.helm.binary.clone()));
    let catalog = Arc::new(ArtifactHubClient::new(config.catalog.base_url.clone(), config.catalog.limit));
    let ctx = TabContext::new(workspace, &config);

    helmtui::ui::run_app(&config, ctx, runner, catalog, logger).await
}
