//! Dimension transforms: one OLTP table → one OLAP dimension.
//!
//! Entirely driven by the declared [`DimensionSpec`]s: validate the
//! required columns, rename the raw identifier to `source_<entity>_id`,
//! apply the declared renames, project to the declared output set, dedup
//! by source id keeping the first occurrence, and assign dense 1-based
//! surrogate ids in post-dedup row order.
use std::collections::HashSet;

use warehouse_etl_shared::schema::DimensionSpec;
use warehouse_etl_shared::types::{IdMap, SourceKey, Table, Value};

use crate::errors::TransformerError;

/// Transforms one raw source table into its dimension plus the
/// source-to-surrogate id map the fact transform consumes.
pub fn transform_dimension(
    raw: &Table,
    spec: &DimensionSpec,
) -> Result<(Table, IdMap), TransformerError> {
    let missing = raw.missing_columns(spec.required_columns);
    if !missing.is_empty() {
        return Err(TransformerError::SchemaMismatch {
            table: spec.source_table.to_string(),
            missing,
        });
    }

    // `id` is part of every required set, so the index exists after the
    // check above; the same holds for the projected origins below.
    let id_idx = raw.column_index("id").ok_or_else(|| missing_column(spec, "id"))?;

    // Source position of each output column beyond the two identifiers,
    // resolving declared renames back to their source names.
    let mut source_indices = Vec::with_capacity(spec.output_columns.len() - 2);
    for column in &spec.output_columns[2..] {
        let origin = spec
            .renames
            .iter()
            .find(|(_, to)| *to == column.name)
            .map(|(from, _)| *from)
            .unwrap_or(column.name);
        let idx = raw
            .column_index(origin)
            .ok_or_else(|| missing_column(spec, origin))?;
        source_indices.push(idx);
    }

    let mut dimension = Table::new(spec.output_names());
    let mut id_map = IdMap::new();
    let mut seen: HashSet<SourceKey> = HashSet::with_capacity(raw.len());
    let mut surrogate: i64 = 1;

    for row in raw.rows() {
        let source_id = &row[id_idx];
        let Some(key) = SourceKey::from_value(source_id) else {
            // A row without a usable identifier cannot join anything.
            continue;
        };
        if !seen.insert(key.clone()) {
            continue;
        }

        let mut values = Vec::with_capacity(spec.output_columns.len());
        values.push(Value::Int(surrogate));
        values.push(source_id.clone());
        for &idx in &source_indices {
            values.push(row[idx].clone());
        }
        dimension.push_row(values);

        id_map.insert(key, surrogate);
        surrogate += 1;
    }

    Ok((dimension, id_map))
}

fn missing_column(spec: &DimensionSpec, column: &str) -> TransformerError {
    TransformerError::SchemaMismatch {
        table: spec.source_table.to_string(),
        missing: vec![column.to_string()],
    }
}
