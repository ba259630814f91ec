//! Error types for the OLAP warehouse repository.
use thiserror::Error;

/// Represents errors that can occur while refreshing destination tables.
#[derive(Debug, Error)]
pub enum WarehouseRepositoryError {
    /// The destination table is not part of the declared OLAP schema.
    #[error("Unknown destination table '{0}'")]
    UnknownTable(String),

    /// The truncate, insert, or commit failed; the table's transaction was
    /// rolled back and the prior rows are intact.
    #[error("Failed to load table '{table}': {source}")]
    Load {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}
