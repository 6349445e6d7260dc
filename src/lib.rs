use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

pub mod config;
pub mod mcp;
pub mod registry;

pub use crate::config::{AppConfig, RegistryConfig, Transport};
pub use crate::mcp::McpService;
pub use crate::registry::RegistryClient;

use crate::mcp::tools::ToolRegistry;
use crate::mcp::McpState;

/// Build the MCP service for an already validated registry configuration.
pub fn build_service(registry: RegistryConfig) -> anyhow::Result<McpService> {
    let client = RegistryClient::new(registry).context("failed to create registry client")?;
    Ok(McpService::new(ToolRegistry::new(client)))
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    log::info!(
        "using registry {} for organization {}",
        config.registry.base_url,
        config.registry.organization
    );

    let service = build_service(config.registry)?;

    match config.transport {
        Transport::Stdio => mcp::stdio::serve(service)
            .await
            .context("stdio transport failed"),
        Transport::Http { host, port } => serve_http(service, &host, port).await,
    }
}

async fn serve_http(service: McpService, host: &str, port: u16) -> anyhow::Result<()> {
    let state = web::Data::new(Arc::new(McpState::new(service)));

    log::info!("Starting MCP server at http://{}:{}/mcp", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(mcp::config)
    })
    .bind((host, port))
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("HTTP server failed")
}
