mod cli;
mod config;
mod graph;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memgraph", version, about = "Knowledge graph memory MCP server")]
struct Cli {
    /// Config file to load instead of ~/.memgraph/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server
    Serve {
        /// Transport to use: stdio or http (overrides config)
        #[arg(long)]
        transport: Option<String>,
    },
    /// Print graph statistics
    Stats,
    /// Search entities and relations by text
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show entities by name with the relations between them
    Inspect {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show entities and relations around an entity
    Related {
        name: String,
        #[arg(long, default_value_t = 1)]
        depth: usize,
    },
    /// Dump the whole graph as JSON to stdout
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::MemgraphConfig::load_from(path)?,
        None => config::MemgraphConfig::load()?,
    };

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { transport } => {
            if let Some(transport) = transport {
                config.server.transport = transport;
            }
            server::serve(config).await?;
        }
        Command::Stats => cli::stats::stats(&config)?,
        Command::Search { query, limit } => cli::search::search(&config, &query, limit)?,
        Command::Inspect { names } => cli::inspect::inspect(&config, &names)?,
        Command::Related { name, depth } => cli::related::related(&config, &name, depth)?,
        Command::Export => cli::export::export(&config)?,
    }

    Ok(())
}
