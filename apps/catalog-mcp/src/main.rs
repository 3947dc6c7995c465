//! MCP stdio server exposing the catalog tools.
//!
//! Configuration comes from the environment (optionally seeded from a `.env`
//! file). Logs go to stderr; stdout carries the MCP protocol.

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_async::{ClientLifecycle, Settings};
use catalog_tool_mcp::{RegistryServer, ServiceExt, stdio};
use catalog_tools::{CatalogTools, build_registry};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

const INSTRUCTIONS: &str = "Search and browse the catalog. Use search_items for free-text queries, \
get_item_details for a single item, list_categories to discover category names, and \
get_popular_items to browse trending items overall or within a category. Failures come back \
as records with an `error` field.";

#[derive(Parser, Debug)]
#[command(name = "catalog-mcp")]
#[command(about = "MCP server for searching and browsing a catalog API", version)]
struct Args {
    /// List available tools and exit
    #[arg(long)]
    list_tools: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    init_tracing(&args.log_level);

    let settings = Settings::new();
    let lifecycle = Arc::new(ClientLifecycle::new(settings.clone()));
    let registry = build_registry(CatalogTools::new(Arc::clone(&lifecycle)));

    if args.list_tools {
        let names = registry.list_names();
        eprintln!("Available tools ({}):", names.len());
        for n in names {
            eprintln!("  - {n}");
        }
        return Ok(());
    }

    settings
        .validate()
        .context("catalog settings are incomplete")?;

    info!(
        tools = registry.len(),
        api_base = %settings.api_base_url(),
        "starting catalog-mcp"
    );

    let server = RegistryServer::new(Arc::new(registry))
        .with_info("catalog-mcp", env!("CARGO_PKG_VERSION"))
        .with_instructions(INSTRUCTIONS);

    let result = serve(server).await;
    if let Err(e) = &result {
        error!(error = %e, "server stopped with an error");
        lifecycle.shutdown().await;
    }
    lifecycle.shutdown().await;
    result
}

fn init_tracing(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Serve over stdio until the client disconnects or the process is interrupted.
async fn serve(server: RegistryServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP stdio transport")?;

    tokio::select! {
        res = service.waiting() => {
            let reason = res.context("MCP service task failed")?;
            info!(?reason, "transport closed");
        }
        res = tokio::signal::ctrl_c() => {
            res.context("failed to listen for ctrl-c")?;
            info!("interrupted");
        }
    }

    Ok(())
}
