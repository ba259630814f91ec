mod extractor;
mod loader;
mod orchestrator;
mod transformer;

pub use extractor::ExtractorError;
pub use loader::LoaderError;
pub use orchestrator::OrchestratorError;
pub use transformer::TransformerError;
