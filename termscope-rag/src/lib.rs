mod analysis;
mod chat;
mod error;
mod sources;

pub use analysis::{parse_analysis, Analysis, RiskAnalyzer};
pub use chat::{ContextChunk, RagAnswer, RagChat, NO_CONTEXT_MESSAGE, NO_DOCUMENT_MESSAGE};
pub use error::{AnalysisError, RagError};
pub use sources::{dedup_sources, SourceRef};
