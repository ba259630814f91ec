//! Error types for connection configuration.
use thiserror::Error;

/// Represents errors raised while resolving database connection
/// configuration, before any I/O happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The connection URL is missing a scheme, a hostname, or a database
    /// path, or is not a URL at all.
    #[error("Invalid connection URL: {0}")]
    InvalidConnectionUrl(String),
}
