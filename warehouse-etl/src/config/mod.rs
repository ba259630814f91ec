//! Configuration module for the Warehouse ETL.
//! Resolves the environment into the wired-up pipeline dependencies.
mod dependencies;

pub use dependencies::Dependencies;
