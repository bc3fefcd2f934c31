//! geolabel — assign geographic labels to cluster nodes
//!
//! One pass per invocation: enumerate the cluster's nodes, resolve
//! each node's advertised hostname, look the address up in a local
//! MaxMind City database and merge the encoded attributes onto the
//! node as labels. The labels can then drive location-aware workload
//! scheduling.
//!
//! # Usage
//!
//! ```bash
//! geolabel --api-url https://cluster.example.com:6443 \
//!          --token "$TOKEN" \
//!          --db /var/lib/geolabel/GeoLite2-City.mmdb
//! ```
//!
//! Exits non-zero if any node could not be labeled.

use anyhow::Context;
use clap::Parser;
use geolabel_core::{Orchestrator, PassSummary, SystemResolver};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod geodb;
mod output;
mod registry;

use config::Config;
use geodb::MaxMindGeoDb;
use registry::KubeNodeRegistry;

#[derive(Parser)]
#[command(name = "geolabel")]
#[command(version = "0.1.0")]
#[command(about = "Assign geographic labels to cluster nodes", long_about = None)]
struct Cli {
    /// Registry API server URL
    #[arg(long, env = "GEOLABEL_API_URL")]
    api_url: Option<String>,

    /// Bearer token for API authentication
    #[arg(long, env = "GEOLABEL_TOKEN")]
    token: Option<String>,

    /// Path to the MaxMind City database file
    #[arg(long, env = "GEOLABEL_DB")]
    db: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Output format for the final summary
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    tracing::info!("geolabel v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(summary) => {
            if !summary.succeeded() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<PassSummary> {
    let config = Config::load(cli.profile.as_deref())?;

    let api_url = cli
        .api_url
        .or(config.api_url)
        .context("no API server URL; pass --api-url or set api_url in the config file")?;
    let db_path = cli
        .db
        .or(config.db.map(PathBuf::from))
        .context("no geolocation database; pass --db or set db in the config file")?;
    let token = cli.token.or(config.token);
    let insecure = cli.insecure || config.insecure.unwrap_or(false);

    let geodb = MaxMindGeoDb::open(&db_path)
        .with_context(|| format!("cannot open geolocation database {}", db_path.display()))?;
    let registry = KubeNodeRegistry::new(&api_url, token.as_deref(), insecure)?;

    let orchestrator = Orchestrator::new(
        Arc::new(SystemResolver),
        Arc::new(geodb),
        Arc::new(registry),
    );
    let summary = orchestrator.run().await.context("labeling pass failed")?;
    output::print_summary(&summary, cli.format);
    Ok(summary)
}
