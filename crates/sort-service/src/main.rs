//! # Sort-as-a-Service
//!
//! Serves `POST /` sorting on the slow list until Ctrl+C.
//!
//! ## Configuration
//!
//! - `SORT_TYPE`: `random` or `bubble`; anything else runs quicksort
//! - `SORT_PORT`: listening port (default 7040)
//! - `RUST_LOG`: tracing filter (default `debug`)

use anyhow::Result;
use sort_service::{ServiceConfig, SortServer};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    info!("Starting");

    let config = ServiceConfig::from_env();
    let server = SortServer::new(config);
    let shutdown = server.shutdown_handle();

    let mut running = tokio::spawn(server.run());

    tokio::select! {
        result = &mut running => return result?,
        signal = tokio::signal::ctrl_c() => signal?,
    }
    info!("shutting down");
    shutdown.cancel();

    running.await??;
    Ok(())
}
