//! This module defines the `WarehouseRepository` trait, the write interface
//! against the OLAP database. It abstracts the truncate-and-reload refresh
//! of one destination table.
use warehouse_etl_shared::types::Table;

use crate::errors::WarehouseRepositoryError;

/// A trait that defines the write interface for the OLAP warehouse.
///
/// Implementors replace the full contents of one destination table
/// atomically: observers see either the prior rows or the new rows, never a
/// half-populated table.
#[async_trait::async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// Replaces all rows of `table` with `data` within a single
    /// transaction: truncate (cascading to dependents), bulk-insert, then
    /// commit. Rolls back on any failure.
    async fn replace_table(&self, table: &str, data: &Table)
        -> Result<(), WarehouseRepositoryError>;
}
