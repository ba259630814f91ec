//! Error types for the warehouse ETL repositories.
//! Consolidates and re-exports error types for configuration parsing and
//! for source/warehouse database operations.
mod config;
mod source;
mod warehouse;

pub use config::ConfigError;
pub use source::SourceRepositoryError;
pub use warehouse::WarehouseRepositoryError;
