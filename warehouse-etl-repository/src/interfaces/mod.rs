//! This module defines and re-exports the repository interfaces for the
//! source and warehouse databases.
mod source;
mod warehouse;

pub use source::SourceRepository;
pub use warehouse::WarehouseRepository;
