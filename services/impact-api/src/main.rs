//! Impact API Server
//!
//! Ranks countries by the change of a climate metric over a date range.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use boundaries::{spawn_loader, BoundaryLoader};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use impact_api::config::Args;
use impact_api::routes::router;
use impact_api::state::AppState;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting impact API server");

    let state = Arc::new(AppState::new(&args, Some(prometheus_handle))?);

    // Boundaries load in the background; requests answer 503 until then.
    let loader = BoundaryLoader::new(args.loader_config())
        .context("Failed to build boundary loader")?;
    spawn_loader(loader, state.boundaries.clone());

    let app = router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Impact API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
