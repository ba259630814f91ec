//! Error types for the Warehouse ETL application.
//! Consolidates startup failures (environment, connection URLs, pools)
//! with the pipeline error surfaced by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("Configuration error: {0}")]
    Config(#[from] warehouse_etl_repository::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] warehouse_etl_pipeline::errors::OrchestratorError),
}
