//! Error types for the transformer stage.
//! A partial star schema is worse than no refresh, so any schema mismatch
//! aborts the batch before the load begins.
use thiserror::Error;

/// Represents errors that can occur while building the star schema.
#[derive(Debug, Error)]
pub enum TransformerError {
    /// A table is missing columns its declared contract requires.
    #[error("Missing required columns in table '{table}': {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    /// The extractor output does not cover every required source table.
    #[error("Missing required tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),
}
