use anyhow::Result;
use persistence::ClientStore;
use tracing::info;

use client_book::{config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting Client Book v{}", env!("CARGO_PKG_VERSION"));

    // Connecting ensures the schema
    let store = ClientStore::connect(config.database.credentials())
        .await?
        .with_export_dir(&config.export.output_dir);

    if !config.export.is_requested() {
        info!(database = %store.database(), "Schema ready, no export requested");
        return Ok(());
    }

    let report = store
        .export_all(config.export.csv, config.export.json)
        .await?;
    info!(
        database = %store.database(),
        rows = report.rows,
        files = report.written().len(),
        "Export completed"
    );

    Ok(())
}
