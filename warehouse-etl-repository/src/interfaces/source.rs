//! This module defines the `SourceRepository` trait, the read interface
//! against the OLTP database. It abstracts full-table extraction behind an
//! explicit, pre-declared column list.
use warehouse_etl_shared::schema::Column;
use warehouse_etl_shared::types::Table;

use crate::errors::SourceRepositoryError;

/// A trait that defines the read interface for the OLTP source database.
///
/// Implementors return the full row set of one table, restricted to the
/// declared column list and never an implicit `SELECT *`, so schema drift
/// in the source surfaces as an error instead of silently changing output.
#[async_trait::async_trait]
pub trait SourceRepository: Send + Sync {
    /// Reads the full row set of `table`, selecting exactly `columns` in
    /// order.
    ///
    /// # Returns
    ///
    /// A `Table` with one decoded row per source row (possibly empty), or a
    /// `SourceRepositoryError` naming the table on driver failure.
    async fn fetch_table(
        &self,
        table: &str,
        columns: &[Column],
    ) -> Result<Table, SourceRepositoryError>;
}
