//! HTTP server for the salon payroll engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;

use salon_payroll::api::{AppState, create_router};
use salon_payroll::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "salon-payroll")]
#[command(about = "Salon staff payroll calculation server", long_about = None)]
struct Cli {
    /// Directory holding salon.yaml, brackets.yaml, positions.yaml and rules.yaml
    #[arg(long, default_value = "./config/salon")]
    config: PathBuf,
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    info!(
        salon = %config.salon().code,
        version = %config.salon().version,
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(bind = %cli.bind, "Salon payroll server ready");

    axum::serve(listener, create_router(AppState::new(config)))
        .await
        .context("server error")?;
    Ok(())
}
