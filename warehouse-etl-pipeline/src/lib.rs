//! # Warehouse ETL Pipeline
//! This crate defines the core stages of the OLTP → OLAP batch refresh.
//! It includes modules for extracting, transforming, and loading table
//! data, an orchestrator sequencing the three, and per-stage error types.
//!
//! ## Architecture
//!
//! 1. **Extractor**: pulls every declared source table concurrently, one
//!    task per table
//! 2. **Transformer**: reshapes source tables into the star schema with
//!    surrogate keys and referential integrity
//! 3. **Loader**: truncate-and-reload of each destination table,
//!    dimensions before the fact table
//! 4. **Orchestrator**: runs extract → transform → load as one batch
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod orchestrator;
pub mod transformer;
