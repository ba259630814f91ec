//! Error types for the orchestrator.
//! Consolidates the per-stage errors into the single failure the batch
//! entry point reports.
use thiserror::Error;

use crate::errors::{ExtractorError, LoaderError, TransformerError};

/// Represents errors that can occur while running the batch.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractorError),

    #[error("Transformation failed: {0}")]
    Transformation(#[from] TransformerError),

    #[error("Load failed: {0}")]
    Load(#[from] LoaderError),
}
