//! Umbrella crate re-exporting the termscope workspace.
//!
//! Pull in `termscope` with the default features for the chunking,
//! indexing and chat layers, or depend on the member crates directly
//! when only one layer is needed.

pub use termscope_core as core;

#[cfg(feature = "retrieval")]
pub use termscope_retrieval as retrieval;

#[cfg(feature = "llm")]
pub use termscope_llm as llm;

#[cfg(feature = "rag")]
pub use termscope_rag as rag;

pub use termscope_core::{
    Chunk, ChunkFilter, CompanyRecord, CompanyStore, CompletionRequest, Embedding, LanguageModel,
    Message, PolicyDocument, PolicyType, RetrievedChunk, Risk, Severity, VectorIndex,
};

#[cfg(feature = "retrieval")]
pub use termscope_retrieval::{InMemoryVectorIndex, Indexer, Retriever, TextChunker};

#[cfg(feature = "rag")]
pub use termscope_rag::{parse_analysis, Analysis, RagChat, RiskAnalyzer};
