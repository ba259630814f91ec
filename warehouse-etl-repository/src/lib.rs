//! # Warehouse ETL Repository
//! This crate provides traits and implementations for the two databases the
//! ETL touches: the OLTP source (full-table reads with explicit column
//! lists) and the OLAP warehouse (truncate-and-reload bulk writes). It
//! includes definitions for errors, interfaces, concrete PostgreSQL
//! implementations, and the connection-URL resolver.
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use config::ConnectionParams;
pub use errors::{ConfigError, SourceRepositoryError, WarehouseRepositoryError};
pub use interfaces::{SourceRepository, WarehouseRepository};
pub use postgres::{PostgresSourceRepository, PostgresWarehouseRepository};
