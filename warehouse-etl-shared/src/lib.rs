//! # Warehouse ETL Shared
//! This crate defines the data structures shared across the warehouse ETL
//! workspace: the `Value` cell type, the schema-carrying `Table` row set,
//! the run-scoped `IdMap`, and the declared column registries for the OLTP
//! source and the OLAP star schema.
pub mod schema;
pub mod types;
