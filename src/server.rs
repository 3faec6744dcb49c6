//! MCP server initialization for stdio and streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire the graph
//! store and MCP tool handler into a running server.

use crate::config::MemgraphConfig;
use crate::graph::GraphStore;
use crate::tools::MemgraphTools;
use anyhow::{bail, Result};
use rmcp::ServiceExt;
use std::sync::{Arc, Mutex};

/// Start the server on whichever transport the config names.
pub async fn serve(config: MemgraphConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "stdio" => serve_stdio(config).await,
        "http" | "sse" => serve_http(config).await,
        other => bail!("unknown transport: {other} (expected 'stdio' or 'http')"),
    }
}

/// Shared setup: resolve the backing file and wrap store + config for sharing.
fn setup_shared_state(
    config: MemgraphConfig,
) -> Result<(Arc<Mutex<GraphStore>>, Arc<MemgraphConfig>)> {
    let memory_path = config.resolved_memory_path()?;
    let store = GraphStore::new(&memory_path);

    // Surface an unreadable file at startup rather than on the first tool call.
    let graph = store.load()?;
    tracing::info!(
        path = %memory_path.display(),
        entities = graph.entities.len(),
        relations = graph.relations.len(),
        "graph store ready"
    );

    Ok((Arc::new(Mutex::new(store)), Arc::new(config)))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: MemgraphConfig) -> Result<()> {
    tracing::info!("starting memgraph MCP server on stdio");

    let (store, config) = setup_shared_state(config)?;

    let tools = MemgraphTools::new(store, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over streamable HTTP transport.
pub async fn serve_http(config: MemgraphConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting memgraph MCP server on HTTP");

    let (store, config) = setup_shared_state(config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(MemgraphTools::new(store.clone(), config.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
