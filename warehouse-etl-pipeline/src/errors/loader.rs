//! Error types for the loader stage.
//! Defines the errors that mark a batch as failed during the OLAP reload.
use thiserror::Error;
use warehouse_etl_repository::WarehouseRepositoryError;

/// Represents errors that can occur while loading the star schema.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The transformed data set does not cover every destination table.
    #[error("Missing required tables for loading: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    /// A table's columns do not match the declared OLAP column set.
    #[error("Table '{table}' does not match the declared OLAP columns (missing: {})", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("Warehouse repository error: {0}")]
    Repository(#[from] WarehouseRepositoryError),
}
