//! Error types for the OLTP source repository.
use thiserror::Error;

/// Represents errors that can occur while reading source tables.
///
/// Both variants carry the failing table name so extraction failures can be
/// reported per table.
#[derive(Debug, Error)]
pub enum SourceRepositoryError {
    #[error("Query failed for table '{table}': {source}")]
    Query {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to decode column '{column}' of table '{table}': {source}")]
    Decode {
        table: String,
        column: String,
        #[source]
        source: sqlx::Error,
    },
}
