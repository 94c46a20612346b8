use thiserror::Error;

use termscope_core::CompletionError;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no document text available for analysis")]
    EmptyDocument,
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),
}
