pub mod analysis;
pub mod api;
pub mod config;
pub mod db;
pub mod extraction;
pub mod summarizer;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::LabKnowledge;
use crate::api::ApiContext;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),

    #[error("Lab reference data invalid: {0}")]
    Knowledge(#[from] serde_json::Error),
}

/// Start the service: data dir, database migrations, knowledge base, OCR
/// engine, HTTP server. Runs until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("MediScan starting v{}", config::APP_VERSION);

    std::fs::create_dir_all(config::app_data_dir())?;

    // Opening once up front runs migrations before the first request.
    let db_path = config::db_path();
    db::open_database(&db_path)?;

    let knowledge = Arc::new(LabKnowledge::bundled()?);
    let ocr = extraction::default_engine();
    let ctx = ApiContext::new(db_path, knowledge, ocr);

    let mut server = api::start_server(ctx, config::DEFAULT_PORT).await?;
    tracing::info!("Listening on http://{}", server.addr);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    server.shutdown();

    Ok(())
}
