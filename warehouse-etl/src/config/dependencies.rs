use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use warehouse_etl_pipeline::extractor::Extractor;
use warehouse_etl_pipeline::loader::Loader;
use warehouse_etl_pipeline::orchestrator::Orchestrator;
use warehouse_etl_pipeline::transformer::Transformer;
use warehouse_etl_repository::{
    ConnectionParams, PostgresSourceRepository, PostgresWarehouseRepository,
};
use warehouse_etl_shared::schema::SOURCE_TABLES;

use crate::errors::EtlError;

const OLTP_DATABASE_URL: &str = "OLTP_DATABASE_URL";
const OLAP_DATABASE_URL: &str = "OLAP_DATABASE_URL";

/// Extraction pool sized to the per-table task fan-out.
const SOURCE_POOL_SIZE: u32 = SOURCE_TABLES.len() as u32;

/// `Dependencies` holds the fully wired batch pipeline.
pub struct Dependencies {
    pub orchestrator: Orchestrator,
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Resolves both connection URLs from the environment, parses them,
    /// opens one pool per database, and wires the repositories into the
    /// pipeline stages.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or an
    /// `EtlError` when a variable is missing, a URL is malformed, or a
    /// pool cannot be opened.
    pub async fn new() -> Result<Self, EtlError> {
        let oltp_url = require_env(OLTP_DATABASE_URL)?;
        let olap_url = require_env(OLAP_DATABASE_URL)?;

        let oltp_params = ConnectionParams::parse(&oltp_url)?;
        let olap_params = ConnectionParams::parse(&olap_url)?;

        let oltp_pool = PgPoolOptions::new()
            .max_connections(SOURCE_POOL_SIZE)
            .connect_with(oltp_params.connect_options())
            .await?;
        info!(host = %oltp_params.host, database = %oltp_params.database, "Connected to source database");

        let olap_pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(olap_params.connect_options())
            .await?;
        info!(host = %olap_params.host, database = %olap_params.database, "Connected to warehouse database");

        let extractor = Extractor::new(Arc::new(PostgresSourceRepository::new(oltp_pool)));
        let loader = Loader::new(Arc::new(PostgresWarehouseRepository::new(olap_pool)));
        let orchestrator = Orchestrator::new(extractor, Transformer::new(), loader);

        Ok(Dependencies { orchestrator })
    }
}

fn require_env(name: &'static str) -> Result<String, EtlError> {
    std::env::var(name).map_err(|_| EtlError::MissingEnv(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        env::remove_var(OLTP_DATABASE_URL);
        env::remove_var(OLAP_DATABASE_URL);
    }

    #[tokio::test]
    #[serial]
    async fn missing_oltp_url_is_fatal() {
        clear_env_vars();
        env::set_var(OLAP_DATABASE_URL, "postgresql://u:p@localhost/olap");

        let err = Dependencies::new().await.unwrap_err();
        assert!(matches!(err, EtlError::MissingEnv(OLTP_DATABASE_URL)));
    }

    #[tokio::test]
    #[serial]
    async fn missing_olap_url_is_fatal() {
        clear_env_vars();
        env::set_var(OLTP_DATABASE_URL, "postgresql://u:p@localhost/oltp");

        let err = Dependencies::new().await.unwrap_err();
        assert!(matches!(err, EtlError::MissingEnv(OLAP_DATABASE_URL)));
    }

    #[tokio::test]
    #[serial]
    async fn malformed_url_fails_before_any_connection() {
        clear_env_vars();
        env::set_var(OLTP_DATABASE_URL, "not-a-url");
        env::set_var(OLAP_DATABASE_URL, "postgresql://u:p@localhost/olap");

        let err = Dependencies::new().await.unwrap_err();
        assert!(matches!(err, EtlError::Config(_)));
    }
}
