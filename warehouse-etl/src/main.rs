//! Warehouse ETL Main Entry Point
//!
//! Runs one full batch refresh of the analytics warehouse: extract every
//! source table, transform into the star schema, and reload the
//! destination tables.

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warehouse_etl::{Dependencies, EtlError};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warehouse_etl=info,warehouse_etl_pipeline=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), EtlError> {
    dotenv().ok();
    init_tracing();

    info!(
        service_version = env!("CARGO_PKG_VERSION"),
        "Starting warehouse batch refresh"
    );

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.orchestrator.run().await {
        Ok(()) => {
            info!("Warehouse batch refresh completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Warehouse batch refresh failed");
            Err(e.into())
        }
    }
}
