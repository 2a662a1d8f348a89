//! Client Directory - Main entry point
//!
//! Serves the company client directory over the Model Context Protocol (stdio).

use anyhow::Result;
use client_directory::repositories::{CompanyRepository, CsvDirectoryRepository};
use client_directory::services::{DirectoryService, DirectoryServiceImpl};
use client_directory::{ClientDirectoryServer, Config, RelevanceSearch, SearchMetrics};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Loading config first picks up LOG_LEVEL and RUST_LOG from .env
    let config = Config::from_env();
    let directive = config
        .as_ref()
        .map(|cfg| cfg.log_directive())
        .unwrap_or_else(|_| Config::default().log_directive());

    // Logging goes to stderr; stdout carries MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting client directory server for exports in {}",
        config.clients_dir.display()
    );

    let repository = Arc::new(CsvDirectoryRepository::new(
        config.clients_dir.clone(),
        config.cache_ttl_secs(),
    )) as Arc<dyn CompanyRepository>;

    let metrics = SearchMetrics::new();
    let service = Arc::new(
        DirectoryServiceImpl::new(
            repository,
            RelevanceSearch::new(config.search_concurrency),
            metrics.clone(),
        )
        .with_load_timeout(Duration::from_secs(config.load_timeout_secs)),
    ) as Arc<dyn DirectoryService>;

    let server = ClientDirectoryServer::new(service);

    info!(
        "Cache TTL: {} minutes, load timeout: {}s, search concurrency: {}",
        config.cache_ttl_minutes, config.load_timeout_secs, config.search_concurrency
    );

    info!("Starting MCP server with stdio transport");
    client_directory::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Client directory server shutdown complete");
    Ok(())
}
