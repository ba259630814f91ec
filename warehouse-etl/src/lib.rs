//! Warehouse ETL
//!
//! This library wires up the batch refresh of the analytics warehouse:
//! configuration resolved from the environment, the two database pools,
//! and the extract → transform → load pipeline built on top of them.

pub mod config;
pub mod errors;

pub use config::Dependencies;
pub use errors::EtlError;
