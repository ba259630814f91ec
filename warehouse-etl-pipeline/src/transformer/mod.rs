//! Transformer stage: raw source tables → star schema.
//!
//! Pure and deterministic: same input map, same output map. Dimensions
//! run first so their id maps are available to the fact transform.
use std::collections::HashMap;

use tracing::info;

use warehouse_etl_shared::schema::{
    DimensionSpec, CONTENT_DIMENSION, DIMENSIONS, FACT_TABLE, PLACES_DIMENSION,
    PROPERTY_DIMENSION, REQUIRED_SOURCE_TABLES, USERS_DIMENSION,
};
use warehouse_etl_shared::types::{IdMap, Table};

use crate::errors::TransformerError;

pub mod dimensions;
pub mod fact;

pub use dimensions::transform_dimension;
pub use fact::{transform_interactions, FactIdMaps};

/// `Transformer` reshapes extracted source tables into the star schema.
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    /// Transforms the extracted tables into the five destination tables,
    /// keyed by OLAP table name.
    ///
    /// The optional junctions (`content_places`, `place_properties`) may
    /// be absent from the input; every required table must be present or
    /// the whole batch fails before any dimension is built.
    pub fn transform(
        &self,
        raw: &HashMap<String, Table>,
    ) -> Result<HashMap<String, Table>, TransformerError> {
        let missing: Vec<String> = REQUIRED_SOURCE_TABLES
            .iter()
            .filter(|table| !raw.contains_key(**table))
            .map(|table| table.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TransformerError::MissingTables(missing));
        }

        let mut transformed = HashMap::with_capacity(DIMENSIONS.len() + 1);
        let mut build = |spec: &DimensionSpec| -> Result<IdMap, TransformerError> {
            // Required tables were checked above.
            let source = &raw[spec.source_table];
            let (dimension, id_map) = transform_dimension(source, spec)?;
            info!(
                table = %spec.olap_table,
                rows = dimension.len(),
                "Built dimension"
            );
            transformed.insert(spec.olap_table.to_string(), dimension);
            Ok(id_map)
        };

        // Each id map is bound to its dimension by name, so the fact keys
        // can never cross wires.
        let maps = FactIdMaps {
            users: build(&USERS_DIMENSION)?,
            content: build(&CONTENT_DIMENSION)?,
            places: build(&PLACES_DIMENSION)?,
            property: build(&PROPERTY_DIMENSION)?,
        };

        let interactions = transform_interactions(
            &raw["user_contents"],
            raw.get("content_places"),
            raw.get("place_properties"),
            &maps,
        )?;
        info!(rows = interactions.len(), "Built fact table");
        transformed.insert(FACT_TABLE.to_string(), interactions);

        Ok(transformed)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}
