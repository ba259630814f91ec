//! Declared column registries for both sides of the pipeline.
//!
//! Extraction never issues `SELECT *`: every source table has an explicit,
//! versioned column list here, so schema drift in the OLTP database fails
//! fast at validation time instead of silently corrupting the star schema.
//! The OLAP side is declared the same way and checked at transform- and
//! load-time. The `sql/` directory holds the DDL these registries mirror.

/// Declared type of a source column. Drives row decoding in the source
/// repository, so a cell is typed exactly once, at the extraction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Float,
    Bool,
    Timestamp,
}

/// One declared column of a source table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

use ColumnType::{Bool, Float, Int, Text, Timestamp};

/// Every OLTP table the extractor reads, dimension sources first.
pub const SOURCE_TABLES: [&str; 7] = [
    "users",
    "contents",
    "places",
    "property_mapping",
    "user_contents",
    "content_places",
    "place_properties",
];

/// Source tables that must be present for the transform to run. The
/// place/property junctions are optional: when absent, fact rows carry
/// null place/property keys.
pub const REQUIRED_SOURCE_TABLES: [&str; 5] = [
    "users",
    "contents",
    "places",
    "property_mapping",
    "user_contents",
];

const USERS_COLUMNS: [Column; 11] = [
    col("id", Text),
    col("email", Text),
    col("display_name", Text),
    col("first_name", Text),
    col("last_name", Text),
    col("avatar_url", Text),
    col("gender", Text),
    col("provider", Text),
    col("found_us_source", Text),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

const CONTENTS_COLUMNS: [Column; 11] = [
    col("id", Text),
    col("url", Text),
    col("html", Text),
    col("title", Text),
    col("description", Text),
    col("site_name", Text),
    col("icon_url", Text),
    col("preview_image_url", Text),
    col("status", Text),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

const PLACES_COLUMNS: [Column; 23] = [
    col("id", Text),
    col("google_maps_id", Text),
    col("latitude", Float),
    col("longitude", Float),
    col("english_display_name", Text),
    col("zhtw_display_name", Text),
    col("english_address", Text),
    col("zhtw_address", Text),
    col("phone_number", Text),
    col("rating", Float),
    col("photo_urls", Text),
    col("google_map_url", Text),
    col("website_url", Text),
    col("primary_type", Text),
    col("opening_hours", Text),
    col("country_code", Text),
    col("english_administrative_area", Text),
    col("zhtw_administrative_area", Text),
    col("english_locality", Text),
    col("zhtw_locality", Text),
    col("report", Text),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

const PROPERTY_MAPPING_COLUMNS: [Column; 14] = [
    col("id", Text),
    col("slug", Text),
    col("english_display_name", Text),
    col("zhtw_display_name", Text),
    col("english_description", Text),
    col("zhtw_description", Text),
    col("category_type", Text),
    col("source", Text),
    col("source_url", Text),
    col("is_active", Bool),
    col("emoji", Text),
    col("cover_img_url", Text),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

const USER_CONTENTS_COLUMNS: [Column; 5] = [
    col("user_id", Text),
    col("content_id", Text),
    col("is_deleted", Bool),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

const CONTENT_PLACES_COLUMNS: [Column; 2] = [col("content_id", Text), col("place_id", Text)];

const PLACE_PROPERTIES_COLUMNS: [Column; 2] = [col("place_id", Text), col("property_id", Text)];

/// Declared column list of an OLTP table, or `None` for a table the
/// pipeline does not know.
pub fn source_columns(table: &str) -> Option<&'static [Column]> {
    match table {
        "users" => Some(&USERS_COLUMNS),
        "contents" => Some(&CONTENTS_COLUMNS),
        "places" => Some(&PLACES_COLUMNS),
        "property_mapping" => Some(&PROPERTY_MAPPING_COLUMNS),
        "user_contents" => Some(&USER_CONTENTS_COLUMNS),
        "content_places" => Some(&CONTENT_PLACES_COLUMNS),
        "place_properties" => Some(&PLACE_PROPERTIES_COLUMNS),
        _ => None,
    }
}

/// Declarative mapping from one OLTP table to one OLAP dimension.
///
/// The dimension transform is entirely driven by these specs: validate
/// `required_columns`, rename the raw `id` to `source_id_column`, apply
/// `renames`, project to `output_columns`, dedup by source id, assign
/// dense surrogate ids.
#[derive(Debug, Clone, Copy)]
pub struct DimensionSpec {
    pub source_table: &'static str,
    pub olap_table: &'static str,
    /// Name the raw identifier is preserved under, e.g. `source_user_id`.
    pub source_id_column: &'static str,
    /// Source columns that must be present, including the raw `id`.
    pub required_columns: &'static [&'static str],
    /// (source name, output name) pairs for non-identifier renames.
    pub renames: &'static [(&'static str, &'static str)],
    /// Exact output column set with destination types, surrogate `id` and
    /// source id first.
    pub output_columns: &'static [Column],
}

impl DimensionSpec {
    /// Output column names in declaration order.
    pub fn output_names(&self) -> Vec<&'static str> {
        self.output_columns.iter().map(|c| c.name).collect()
    }
}

pub const USERS_DIMENSION: DimensionSpec = DimensionSpec {
    source_table: "users",
    olap_table: "users",
    source_id_column: "source_user_id",
    required_columns: &[
        "id",
        "email",
        "display_name",
        "avatar_url",
        "found_us_source",
        "created_at",
        "updated_at",
    ],
    renames: &[],
    output_columns: &[
        col("id", Int),
        col("source_user_id", Text),
        col("email", Text),
        col("display_name", Text),
        col("avatar_url", Text),
        col("found_us_source", Text),
        col("created_at", Timestamp),
        col("updated_at", Timestamp),
    ],
};

pub const CONTENT_DIMENSION: DimensionSpec = DimensionSpec {
    source_table: "contents",
    olap_table: "content",
    source_id_column: "source_content_id",
    required_columns: &[
        "id",
        "url",
        "title",
        "description",
        "site_name",
        "preview_image_url",
        "status",
        "created_at",
        "updated_at",
    ],
    renames: &[
        ("site_name", "platform"),
        ("preview_image_url", "thumbnail_url"),
    ],
    output_columns: &[
        col("id", Int),
        col("source_content_id", Text),
        col("platform", Text),
        col("url", Text),
        col("title", Text),
        col("thumbnail_url", Text),
        col("description", Text),
        col("status", Text),
        col("created_at", Timestamp),
        col("updated_at", Timestamp),
    ],
};

pub const PLACES_DIMENSION: DimensionSpec = DimensionSpec {
    source_table: "places",
    olap_table: "places",
    source_id_column: "source_place_id",
    required_columns: &[
        "id",
        "google_maps_id",
        "english_display_name",
        "zhtw_display_name",
        "english_address",
        "zhtw_address",
        "phone_number",
        "rating",
        "latitude",
        "longitude",
        "country_code",
        "english_administrative_area",
        "zhtw_administrative_area",
        "english_locality",
        "zhtw_locality",
        "primary_type",
        "created_at",
        "updated_at",
    ],
    renames: &[],
    output_columns: &[
        col("id", Int),
        col("source_place_id", Text),
        col("google_maps_id", Text),
        col("english_display_name", Text),
        col("zhtw_display_name", Text),
        col("english_address", Text),
        col("zhtw_address", Text),
        col("phone_number", Text),
        col("rating", Float),
        col("latitude", Float),
        col("longitude", Float),
        col("country_code", Text),
        col("english_administrative_area", Text),
        col("zhtw_administrative_area", Text),
        col("english_locality", Text),
        col("zhtw_locality", Text),
        col("primary_type", Text),
        col("created_at", Timestamp),
        col("updated_at", Timestamp),
    ],
};

pub const PROPERTY_DIMENSION: DimensionSpec = DimensionSpec {
    source_table: "property_mapping",
    olap_table: "property",
    source_id_column: "source_property_id",
    required_columns: &[
        "id",
        "english_display_name",
        "zhtw_display_name",
        "emoji",
        "category_type",
        "created_at",
        "updated_at",
    ],
    renames: &[
        ("english_display_name", "english_name"),
        ("zhtw_display_name", "zhtw_name"),
    ],
    output_columns: &[
        col("id", Int),
        col("source_property_id", Text),
        col("english_name", Text),
        col("zhtw_name", Text),
        col("emoji", Text),
        col("category_type", Text),
        col("created_at", Timestamp),
        col("updated_at", Timestamp),
    ],
};

/// The four dimension transforms, in the order they run.
pub const DIMENSIONS: [DimensionSpec; 4] = [
    USERS_DIMENSION,
    CONTENT_DIMENSION,
    PLACES_DIMENSION,
    PROPERTY_DIMENSION,
];

/// The OLAP fact table.
pub const FACT_TABLE: &str = "interactions";

/// Exact fact-table column set, in output order. `user_id` and
/// `content_id` are mandatory surrogate keys; `place_id` and `property_id`
/// are nullable.
pub const FACT_COLUMNS: [Column; 6] = [
    col("user_id", Int),
    col("content_id", Int),
    col("place_id", Int),
    col("property_id", Int),
    col("created_at", Timestamp),
    col("updated_at", Timestamp),
];

/// Key/timestamp columns the primary junction must carry.
pub const USER_CONTENTS_KEYS: [&str; 4] = ["user_id", "content_id", "created_at", "updated_at"];
/// Key columns of the optional content → place junction.
pub const CONTENT_PLACES_KEYS: [&str; 2] = ["content_id", "place_id"];
/// Key columns of the optional place → property junction.
pub const PLACE_PROPERTIES_KEYS: [&str; 2] = ["place_id", "property_id"];

/// Every OLAP table the loader writes, dimensions before the fact table.
pub const OLAP_TABLES: [&str; 5] = ["users", "content", "places", "property", FACT_TABLE];

/// Declared column list of an OLAP table, or `None` for an unknown table.
pub fn olap_columns(table: &str) -> Option<&'static [Column]> {
    if table == FACT_TABLE {
        return Some(&FACT_COLUMNS);
    }
    DIMENSIONS
        .iter()
        .find(|spec| spec.olap_table == table)
        .map(|spec| spec.output_columns)
}

/// Column names of a declared column list, in declaration order.
pub fn column_names(columns: &[Column]) -> Vec<&'static str> {
    columns.iter().map(|c| c.name).collect()
}
