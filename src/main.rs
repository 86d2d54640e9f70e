//! This file defines the climate-api binary entry point.

use climate_api::app;
use climate_api::app_state::AppState;
use climate_api::cli;
use climate_api::metrics;
use climate_api::server;
use climate_api::tracing;

use std::process::exit;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing(&args);
    ::tracing::debug!("{:?}", args);
    metrics::register_metrics();
    let state = match AppState::new(&args).await {
        Ok(state) => state,
        Err(err) => {
            ::tracing::error!("failed to open database {}: {}", args.database, err);
            exit(1)
        }
    };
    match state.store.inventory().await {
        Ok(inventory) => ::tracing::info!(
            "serving {} measurements from {} stations",
            inventory.measurements,
            inventory.stations.len()
        ),
        Err(err) => {
            ::tracing::error!("database {} is not a climate database: {}", args.database, err);
            exit(1)
        }
    }
    let service = app::service(Arc::new(state));
    server::serve(&args, service).await;
    tracing::shutdown_tracing();
}
