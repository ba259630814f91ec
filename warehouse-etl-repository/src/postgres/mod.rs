//! PostgreSQL implementations of the repository interfaces.
mod source_repository;
mod warehouse_repository;

pub use source_repository::PostgresSourceRepository;
pub use warehouse_repository::PostgresWarehouseRepository;
