//! Loader stage: full refresh of the OLAP star schema.
//!
//! Each destination table is replaced through the warehouse repository,
//! dimensions strictly before the fact table so `interactions` never
//! lands against dimension rows from a previous batch. Each replacement
//! is atomic per table; a failure leaves the failing table untouched and
//! aborts the batch.
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use warehouse_etl_repository::WarehouseRepository;
use warehouse_etl_shared::schema::{self, OLAP_TABLES};
use warehouse_etl_shared::types::Table;

use crate::errors::LoaderError;

/// `Loader` writes the transformed star schema into the OLAP database.
pub struct Loader {
    repository: Arc<dyn WarehouseRepository>,
}

impl Loader {
    pub fn new(repository: Arc<dyn WarehouseRepository>) -> Self {
        Self { repository }
    }

    /// Loads every destination table, dimensions before the fact table.
    ///
    /// The transformed map must cover all declared destination tables or
    /// the load is rejected before any table is touched.
    pub async fn load(&self, transformed: &HashMap<String, Table>) -> Result<(), LoaderError> {
        let missing: Vec<String> = OLAP_TABLES
            .iter()
            .filter(|table| !transformed.contains_key(**table))
            .map(|table| table.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingTables(missing));
        }

        for table in OLAP_TABLES {
            self.load_table(table, &transformed[table]).await?;
        }

        info!(tables = OLAP_TABLES.len(), "Load complete");
        Ok(())
    }

    /// Replaces one destination table after checking its columns against
    /// the declared OLAP set. An empty table is skipped rather than
    /// truncating the destination to nothing.
    async fn load_table(&self, table: &str, data: &Table) -> Result<(), LoaderError> {
        let declared = schema::olap_columns(table)
            .map(schema::column_names)
            .unwrap_or_default();
        let missing = data.missing_columns(&declared);
        if !missing.is_empty() {
            return Err(LoaderError::SchemaMismatch {
                table: table.to_string(),
                missing,
            });
        }

        if data.is_empty() {
            warn!(table = %table, "Skipping empty table, destination left as-is");
            return Ok(());
        }

        self.repository.replace_table(table, data).await?;
        info!(table = %table, rows = data.len(), "Loaded table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use warehouse_etl_repository::WarehouseRepositoryError;
    use warehouse_etl_shared::schema::{column_names, olap_columns, FACT_TABLE};
    use warehouse_etl_shared::types::Value;

    /// In-memory warehouse that records replacements in call order.
    struct FakeWarehouse {
        replaced: Mutex<Vec<String>>,
        failing_table: Option<&'static str>,
    }

    impl FakeWarehouse {
        fn new() -> Self {
            Self {
                replaced: Mutex::new(Vec::new()),
                failing_table: None,
            }
        }
    }

    #[async_trait]
    impl WarehouseRepository for FakeWarehouse {
        async fn replace_table(
            &self,
            table: &str,
            _data: &Table,
        ) -> Result<(), WarehouseRepositoryError> {
            if self.failing_table == Some(table) {
                return Err(WarehouseRepositoryError::Load {
                    table: table.to_string(),
                    source: sqlx::Error::PoolClosed,
                });
            }
            self.replaced.lock().unwrap().push(table.to_string());
            Ok(())
        }
    }

    fn olap_table(name: &str, rows: usize) -> Table {
        let columns = olap_columns(name).unwrap();
        let mut t = Table::new(column_names(columns));
        for i in 0..rows {
            t.push_row(columns.iter().map(|_| Value::Int(i as i64)).collect());
        }
        t
    }

    fn transformed(rows: usize) -> HashMap<String, Table> {
        OLAP_TABLES
            .iter()
            .map(|&name| (name.to_string(), olap_table(name, rows)))
            .collect()
    }

    #[tokio::test]
    async fn loads_dimensions_before_the_fact_table() {
        let warehouse = Arc::new(FakeWarehouse::new());
        let loader = Loader::new(warehouse.clone());

        loader.load(&transformed(2)).await.unwrap();

        let replaced = warehouse.replaced.lock().unwrap().clone();
        assert_eq!(replaced.len(), OLAP_TABLES.len());
        assert_eq!(replaced.last().map(String::as_str), Some(FACT_TABLE));
        for (got, expected) in replaced.iter().zip(OLAP_TABLES) {
            assert_eq!(got, expected);
        }
    }

    #[tokio::test]
    async fn incomplete_table_set_is_rejected_before_any_write() {
        let warehouse = Arc::new(FakeWarehouse::new());
        let loader = Loader::new(warehouse.clone());

        let mut partial = transformed(1);
        partial.remove(FACT_TABLE);
        partial.remove("places");

        let err = loader.load(&partial).await.unwrap_err();
        match err {
            LoaderError::MissingTables(missing) => {
                assert!(missing.contains(&"places".to_string()));
                assert!(missing.contains(&FACT_TABLE.to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(warehouse.replaced.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_tables_are_skipped_without_touching_the_destination() {
        let warehouse = Arc::new(FakeWarehouse::new());
        let loader = Loader::new(warehouse.clone());

        let mut data = transformed(1);
        data.insert(FACT_TABLE.to_string(), olap_table(FACT_TABLE, 0));

        loader.load(&data).await.unwrap();

        let replaced = warehouse.replaced.lock().unwrap().clone();
        assert_eq!(replaced.len(), OLAP_TABLES.len() - 1);
        assert!(!replaced.contains(&FACT_TABLE.to_string()));
    }

    #[tokio::test]
    async fn wrong_columns_are_a_schema_mismatch() {
        let warehouse = Arc::new(FakeWarehouse::new());
        let loader = Loader::new(warehouse.clone());

        let mut data = transformed(1);
        let mut wrong = Table::new(["id", "something_else"]);
        wrong.push_row(vec![Value::Int(1), Value::Null]);
        data.insert("users".to_string(), wrong);

        let err = loader.load(&data).await.unwrap_err();
        match err {
            LoaderError::SchemaMismatch { table, missing } => {
                assert_eq!(table, "users");
                assert!(missing.contains(&"source_user_id".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn repository_failure_aborts_the_batch() {
        let mut warehouse = FakeWarehouse::new();
        warehouse.failing_table = Some("content");
        let warehouse = Arc::new(warehouse);
        let loader = Loader::new(warehouse.clone());

        let err = loader.load(&transformed(1)).await.unwrap_err();
        assert!(matches!(err, LoaderError::Repository(_)));

        // users loaded first, content failed, nothing after it ran
        let replaced = warehouse.replaced.lock().unwrap().clone();
        assert_eq!(replaced, vec!["users".to_string()]);
    }
}
