use anyhow::Result;
use axum::Router;
use catalog::DisplayCurrency;
use clap::Parser;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Snapshot directory written by catalog-builder; bundled catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Display currency (usd or idr); overrides DISPLAY_CURRENCY
    #[arg(long)]
    currency: Option<DisplayCurrency>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    config.catalog_dir = args.catalog;
    if let Some(currency) = args.currency {
        config.currency = currency;
    }
    tracing::info!(currency = %config.currency, site_url = %config.site_url, "configuration loaded");
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
