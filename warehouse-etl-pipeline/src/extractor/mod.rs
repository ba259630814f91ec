//! Extractor stage: pulls the full contents of every declared source table.
//!
//! One tokio task per table, bounded by the fixed table count, all against
//! a shared connection pool. Aggregation is all-or-nothing: the first
//! observed failure aborts the batch, and results are merged into the
//! output map only after a task fully completes.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use warehouse_etl_repository::SourceRepository;
use warehouse_etl_shared::schema::{self, SOURCE_TABLES};
use warehouse_etl_shared::types::Table;

use crate::errors::ExtractorError;

/// Extracts one source table against its declared column list.
///
/// Fails with [`ExtractorError::UnknownTable`] when the table is not in
/// the registry and [`ExtractorError::EmptyTable`] when it holds no rows;
/// a required table extracting empty would silently corrupt the star
/// schema downstream.
pub async fn extract_table(
    repository: Arc<dyn SourceRepository>,
    table: &'static str,
) -> Result<Table, ExtractorError> {
    let columns = schema::source_columns(table)
        .ok_or_else(|| ExtractorError::UnknownTable(table.to_string()))?;

    let fetched = repository.fetch_table(table, columns).await?;
    if fetched.is_empty() {
        return Err(ExtractorError::EmptyTable(table.to_string()));
    }

    info!(table = %table, rows = fetched.len(), "Fetched source table");
    Ok(fetched)
}

/// `Extractor` pulls every declared source table from the OLTP database.
pub struct Extractor {
    repository: Arc<dyn SourceRepository>,
}

impl Extractor {
    pub fn new(repository: Arc<dyn SourceRepository>) -> Self {
        Self { repository }
    }

    /// Extracts all declared source tables concurrently.
    ///
    /// Every task is joined before this returns, even after a failure:
    /// the first error in declaration order is the batch failure and any
    /// sibling errors are logged rather than lost with a detached task.
    ///
    /// # Returns
    ///
    /// A map from table name to its row set covering every declared table
    /// exactly once, or the first extraction failure.
    pub async fn extract_all(&self) -> Result<HashMap<String, Table>, ExtractorError> {
        let handles: Vec<(&'static str, JoinHandle<Result<Table, ExtractorError>>)> =
            SOURCE_TABLES
                .iter()
                .map(|&table| {
                    let repository = Arc::clone(&self.repository);
                    (table, tokio::spawn(extract_table(repository, table)))
                })
                .collect();

        let mut results = HashMap::with_capacity(handles.len());
        let mut first_error = None;
        for (table, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ExtractorError::Task {
                    table: table.to_string(),
                    message: e.to_string(),
                }),
            };
            match outcome {
                Ok(fetched) => {
                    results.insert(table.to_string(), fetched);
                }
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => warn!(table = %table, error = %e, "Further extraction failure"),
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        info!(tables = results.len(), "Extraction complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use warehouse_etl_repository::SourceRepositoryError;
    use warehouse_etl_shared::schema::Column;
    use warehouse_etl_shared::types::Value;

    /// In-memory source that serves a fixed row count per table and
    /// records which tables were fetched.
    struct FakeSource {
        rows_per_table: usize,
        empty_table: Option<&'static str>,
        failing_tables: Vec<&'static str>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(rows_per_table: usize) -> Self {
            Self {
                rows_per_table,
                empty_table: None,
                failing_tables: Vec::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourceRepository for FakeSource {
        async fn fetch_table(
            &self,
            table: &str,
            columns: &[Column],
        ) -> Result<Table, SourceRepositoryError> {
            self.fetched.lock().unwrap().push(table.to_string());
            if self.failing_tables.contains(&table) {
                return Err(SourceRepositoryError::Query {
                    table: table.to_string(),
                    source: sqlx::Error::PoolClosed,
                });
            }
            let mut out = Table::new(columns.iter().map(|c| c.name));
            if self.empty_table != Some(table) {
                for i in 0..self.rows_per_table {
                    out.push_row(
                        columns
                            .iter()
                            .map(|c| Value::Text(format!("{}-{}", c.name, i)))
                            .collect(),
                    );
                }
            }
            Ok(out)
        }
    }

    #[tokio::test]
    async fn extracts_every_declared_table() {
        let source = Arc::new(FakeSource::new(2));
        let extractor = Extractor::new(source.clone());

        let result = extractor.extract_all().await.unwrap();

        assert_eq!(result.len(), SOURCE_TABLES.len());
        for table in SOURCE_TABLES {
            assert_eq!(result[table].len(), 2, "{table}");
        }
        let mut fetched = source.fetched.lock().unwrap().clone();
        fetched.sort();
        let mut expected: Vec<String> = SOURCE_TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn empty_required_table_fails_the_batch() {
        let mut source = FakeSource::new(1);
        source.empty_table = Some("contents");
        let extractor = Extractor::new(Arc::new(source));

        let err = extractor.extract_all().await.unwrap_err();
        assert!(matches!(err, ExtractorError::EmptyTable(t) if t == "contents"));
    }

    #[tokio::test]
    async fn repository_failure_propagates() {
        let mut source = FakeSource::new(1);
        source.failing_tables = vec!["places"];
        let extractor = Extractor::new(Arc::new(source));

        let err = extractor.extract_all().await.unwrap_err();
        assert!(matches!(err, ExtractorError::Repository(_)));
    }

    #[tokio::test]
    async fn every_task_is_drained_and_the_first_failure_wins() {
        let mut source = FakeSource::new(1);
        // "users" precedes "places" in declaration order
        source.failing_tables = vec!["places", "users"];
        let source = Arc::new(source);
        let extractor = Extractor::new(source.clone());

        let err = extractor.extract_all().await.unwrap_err();
        match err {
            ExtractorError::Repository(SourceRepositoryError::Query { table, .. }) => {
                assert_eq!(table, "users");
            }
            other => panic!("unexpected error: {other}"),
        }

        // all sibling tasks ran to completion before the error surfaced
        let mut fetched = source.fetched.lock().unwrap().clone();
        fetched.sort();
        let mut expected: Vec<String> = SOURCE_TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn unregistered_table_is_rejected_before_any_io() {
        let source = Arc::new(FakeSource::new(1));
        let err = extract_table(source.clone(), "unknown_table")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::UnknownTable(t) if t == "unknown_table"));
        assert!(source.fetched.lock().unwrap().is_empty());
    }
}
