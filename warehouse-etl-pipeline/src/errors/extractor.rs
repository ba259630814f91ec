//! Error types for the extractor stage.
//! Defines the errors that abort an extraction batch; the first observed
//! failure is surfaced and the whole batch fails.
use thiserror::Error;
use warehouse_etl_repository::SourceRepositoryError;

/// Represents errors that can occur during source extraction.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The table has no entry in the declared source column registry.
    #[error("Table '{0}' not found in the source column registry")]
    UnknownTable(String),

    /// A required source table extracted zero rows; downstream joins
    /// assume non-empty dimensions.
    #[error("Table '{0}' returned no rows")]
    EmptyTable(String),

    #[error("Source repository error: {0}")]
    Repository(#[from] SourceRepositoryError),

    /// The extraction task itself failed (panicked or was cancelled).
    #[error("Extraction task for table '{table}' failed: {message}")]
    Task { table: String, message: String },
}
