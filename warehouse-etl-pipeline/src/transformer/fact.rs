//! Fact-table transform: junction rows → `interactions`.
//!
//! Builds the interaction chain by left-joining `user_contents` through
//! the optional `content_places` and `place_properties` junctions, then
//! remaps every source key to its surrogate id. User and content keys are
//! mandatory: a junction row whose user or content is absent from its id
//! map is an orphan and is dropped, never loaded with a null required key.
//! Place and property keys are optional and resolve to null when unmapped
//! or when their junction is not supplied.
use std::collections::HashMap;

use tracing::warn;

use warehouse_etl_shared::schema::{
    column_names, CONTENT_PLACES_KEYS, FACT_COLUMNS, PLACE_PROPERTIES_KEYS, USER_CONTENTS_KEYS,
};
use warehouse_etl_shared::types::{IdMap, SourceKey, Table, Value};

use crate::errors::TransformerError;

/// The four source-to-surrogate maps produced by the dimension transforms,
/// scoped to one run.
pub struct FactIdMaps {
    pub users: IdMap,
    pub content: IdMap,
    pub places: IdMap,
    pub property: IdMap,
}

/// One-to-many lookup from a junction's left key to its right-hand values,
/// preserving input order per key.
fn junction_index(
    table: &Table,
    left: &str,
    right: &str,
) -> HashMap<SourceKey, Vec<Value>> {
    // Key columns were validated by the caller.
    let left_idx = table.column_index(left).unwrap_or_default();
    let right_idx = table.column_index(right).unwrap_or_default();

    let mut index: HashMap<SourceKey, Vec<Value>> = HashMap::new();
    for row in table.rows() {
        if let Some(key) = SourceKey::from_value(&row[left_idx]) {
            index.entry(key).or_default().push(row[right_idx].clone());
        }
    }
    index
}

fn require_columns(
    table: &Table,
    name: &str,
    required: &[&str],
) -> Result<(), TransformerError> {
    let missing = table.missing_columns(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransformerError::SchemaMismatch {
            table: name.to_string(),
            missing,
        })
    }
}

/// Matches of one junction for a key: the matched right-hand values, or a
/// single null when the key has no match or the junction is absent.
fn matches_for<'a>(
    index: Option<&'a HashMap<SourceKey, Vec<Value>>>,
    key: &Value,
) -> Vec<Option<&'a Value>> {
    index
        .and_then(|idx| SourceKey::from_value(key).and_then(|k| idx.get(&k)))
        .map(|values| values.iter().map(Some).collect())
        .unwrap_or_else(|| vec![None])
}

/// Transforms the junction tables into the `interactions` fact table.
pub fn transform_interactions(
    user_contents: &Table,
    content_places: Option<&Table>,
    place_properties: Option<&Table>,
    maps: &FactIdMaps,
) -> Result<Table, TransformerError> {
    require_columns(user_contents, "user_contents", &USER_CONTENTS_KEYS)?;
    if let Some(table) = content_places {
        require_columns(table, "content_places", &CONTENT_PLACES_KEYS)?;
    }
    if let Some(table) = place_properties {
        require_columns(table, "place_properties", &PLACE_PROPERTIES_KEYS)?;
    }

    let places_by_content =
        content_places.map(|t| junction_index(t, "content_id", "place_id"));
    let properties_by_place =
        place_properties.map(|t| junction_index(t, "place_id", "property_id"));

    // Validated above.
    let user_idx = user_contents.column_index("user_id").unwrap_or_default();
    let content_idx = user_contents.column_index("content_id").unwrap_or_default();
    let created_idx = user_contents.column_index("created_at").unwrap_or_default();
    let updated_idx = user_contents.column_index("updated_at").unwrap_or_default();

    let mut fact = Table::new(column_names(&FACT_COLUMNS));
    let mut orphans = 0usize;

    for row in user_contents.rows() {
        let user_raw = &row[user_idx];
        let content_raw = &row[content_idx];

        // Mandatory keys: a junction row that cannot be attributed to a
        // known user and content dimension row is dropped.
        let (Some(user_id), Some(content_id)) =
            (maps.users.resolve(user_raw), maps.content.resolve(content_raw))
        else {
            orphans += 1;
            continue;
        };

        for place_raw in matches_for(places_by_content.as_ref(), content_raw) {
            let place_id = place_raw.and_then(|v| maps.places.resolve(v));

            let property_raws = match place_raw {
                Some(place) => matches_for(properties_by_place.as_ref(), place),
                None => vec![None],
            };
            for property_raw in property_raws {
                let property_id = property_raw.and_then(|v| maps.property.resolve(v));

                fact.push_row(vec![
                    Value::Int(user_id),
                    Value::Int(content_id),
                    place_id.map(Value::Int).unwrap_or(Value::Null),
                    property_id.map(Value::Int).unwrap_or(Value::Null),
                    row[created_idx].clone(),
                    row[updated_idx].clone(),
                ]);
            }
        }
    }

    if orphans > 0 {
        warn!(orphans, "Dropped junction rows referencing unknown dimensions");
    }

    Ok(fact)
}
