//! PostgreSQL implementation of the warehouse repository.
//!
//! Refreshes one destination table per call inside a single transaction:
//! `TRUNCATE ... CASCADE`, then one multi-row `INSERT` built with
//! `QueryBuilder`, then commit. A failure at any point rolls the
//! transaction back, leaving the prior rows in place.
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use warehouse_etl_shared::schema::{self, ColumnType};
use warehouse_etl_shared::types::{Table, Value};

use crate::errors::WarehouseRepositoryError;
use crate::interfaces::WarehouseRepository;

/// PostgreSQL implementation of [`WarehouseRepository`].
pub struct PostgresWarehouseRepository {
    pool: sqlx::PgPool,
}

impl PostgresWarehouseRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarehouseRepository for PostgresWarehouseRepository {
    async fn replace_table(
        &self,
        table: &str,
        data: &Table,
    ) -> Result<(), WarehouseRepositoryError> {
        let declared = schema::olap_columns(table)
            .ok_or_else(|| WarehouseRepositoryError::UnknownTable(table.to_string()))?;

        let load_err = |source| WarehouseRepositoryError::Load {
            table: table.to_string(),
            source,
        };

        let mut tx = self.pool.begin().await.map_err(load_err)?;

        // CASCADE clears dependents holding FKs into this table; the fact
        // table is re-inserted after all dimensions anyway.
        sqlx::query(&format!("TRUNCATE TABLE {table} CASCADE"))
            .execute(&mut *tx)
            .await
            .map_err(load_err)?;

        // An empty row set truncates the table to empty; `push_values`
        // cannot build a zero-row insert.
        if data.is_empty() {
            tx.commit().await.map_err(load_err)?;
            debug!(table = %table, "Destination table truncated to empty");
            return Ok(());
        }

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            table,
            data.columns().join(", ")
        ));
        query_builder.push_values(data.rows(), |mut b, row| {
            for (value, column) in row.iter().zip(declared) {
                match storage_cell(value) {
                    Some(Value::Text(s)) => b.push_bind(s.clone()),
                    Some(Value::Int(i)) => b.push_bind(*i),
                    Some(Value::Float(f)) => b.push_bind(*f),
                    Some(Value::Bool(v)) => b.push_bind(*v),
                    Some(Value::Timestamp(t)) => b.push_bind(*t),
                    // NULL binds take the declared destination type so the
                    // server does not reject an untyped parameter.
                    Some(Value::Null) | None => match column.ty {
                        ColumnType::Text => b.push_bind(Option::<String>::None),
                        ColumnType::Int => b.push_bind(Option::<i64>::None),
                        ColumnType::Float => b.push_bind(Option::<f64>::None),
                        ColumnType::Bool => b.push_bind(Option::<bool>::None),
                        ColumnType::Timestamp => {
                            b.push_bind(Option::<chrono::DateTime<chrono::Utc>>::None)
                        }
                    },
                };
            }
        });

        query_builder.build().execute(&mut *tx).await.map_err(load_err)?;
        tx.commit().await.map_err(load_err)?;

        debug!(table = %table, rows = data.len(), "Destination table refreshed");
        Ok(())
    }
}

/// The bindable form of a cell: `None` for everything that stores as SQL
/// NULL, which includes NaN floats.
fn storage_cell(value: &Value) -> Option<&Value> {
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}
