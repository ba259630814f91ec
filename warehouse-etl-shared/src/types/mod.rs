mod id_map;
mod table;
mod value;

pub use id_map::{IdMap, SourceKey};
pub use table::Table;
pub use value::Value;
