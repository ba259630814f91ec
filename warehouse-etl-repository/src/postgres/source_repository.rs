//! PostgreSQL implementation of the source repository.
//!
//! Issues one explicit-column `SELECT` per table over a shared connection
//! pool and decodes each row according to the declared column types, so a
//! cell is typed exactly once, at the extraction boundary.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::debug;

use warehouse_etl_shared::schema::{Column, ColumnType};
use warehouse_etl_shared::types::{Table, Value};

use crate::errors::SourceRepositoryError;
use crate::interfaces::SourceRepository;

/// PostgreSQL implementation of [`SourceRepository`].
///
/// Shares a `sqlx::PgPool` across concurrent per-table extraction tasks;
/// each call acquires its own connection from the pool.
pub struct PostgresSourceRepository {
    pool: sqlx::PgPool,
}

impl PostgresSourceRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceRepository for PostgresSourceRepository {
    async fn fetch_table(
        &self,
        table: &str,
        columns: &[Column],
    ) -> Result<Table, SourceRepositoryError> {
        let column_list = columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        // Table and column names come from the static registry, never from
        // user input.
        let query = format!("SELECT {column_list} FROM {table}");
        debug!(table = %table, query = %query, "Extracting source table");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| SourceRepositoryError::Query {
                table: table.to_string(),
                source,
            })?;

        let mut out = Table::new(columns.iter().map(|c| c.name));
        for row in &rows {
            let mut values = Vec::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value = decode_cell(row, idx, column.ty).map_err(|source| {
                    SourceRepositoryError::Decode {
                        table: table.to_string(),
                        column: column.name.to_string(),
                        source,
                    }
                })?;
                values.push(value);
            }
            out.push_row(values);
        }

        debug!(table = %table, rows = out.len(), "Source table extracted");
        Ok(out)
    }
}

/// Decodes one cell according to its declared type; SQL NULL becomes
/// [`Value::Null`] regardless of type.
fn decode_cell(row: &PgRow, idx: usize, ty: ColumnType) -> Result<Value, sqlx::Error> {
    let value = match ty {
        ColumnType::Text => row.try_get::<Option<String>, _>(idx)?.map(Value::Text),
        ColumnType::Int => row.try_get::<Option<i64>, _>(idx)?.map(Value::Int),
        ColumnType::Float => row.try_get::<Option<f64>, _>(idx)?.map(Value::Float),
        ColumnType::Bool => row.try_get::<Option<bool>, _>(idx)?.map(Value::Bool),
        ColumnType::Timestamp => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map(Value::Timestamp),
    };
    Ok(value.unwrap_or(Value::Null))
}
