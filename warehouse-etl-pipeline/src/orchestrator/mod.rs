//! Orchestrator: runs one full extract → transform → load batch.
use tracing::info;

use crate::errors::OrchestratorError;
use crate::extractor::Extractor;
use crate::loader::Loader;
use crate::transformer::Transformer;

/// `Orchestrator` sequences the three pipeline stages as one batch.
///
/// Stages run strictly in order and the batch is all-or-nothing up to the
/// per-table load boundary: any stage failure aborts the run and surfaces
/// as a single [`OrchestratorError`].
pub struct Orchestrator {
    extractor: Extractor,
    transformer: Transformer,
    loader: Loader,
}

impl Orchestrator {
    pub fn new(extractor: Extractor, transformer: Transformer, loader: Loader) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Runs one batch refresh of the warehouse.
    pub async fn run(&self) -> Result<(), OrchestratorError> {
        info!("Starting batch refresh");

        let raw = self.extractor.extract_all().await?;
        info!(tables = raw.len(), "Extraction stage complete");

        let transformed = self.transformer.transform(&raw)?;
        info!(tables = transformed.len(), "Transformation stage complete");

        self.loader.load(&transformed).await?;
        info!("Batch refresh complete");

        Ok(())
    }
}
