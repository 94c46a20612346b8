mod chunk;
mod company;
mod embedding;
mod error;
mod fetcher;
mod llm;
mod policy;
mod vector_index;

pub use chunk::{Chunk, ChunkFilter, RetrievedChunk};
pub use company::{CompanyRecord, CompanyStore, PolicyDocument};
pub use embedding::Embedding;
pub use error::{CompletionError, EmbeddingError, FetchError, StoreError};
pub use fetcher::DocumentFetcher;
pub use llm::{CompletionRequest, LanguageModel, Message, Role};
pub use policy::{PolicyType, Risk, Severity};
pub use vector_index::{IndexStats, VectorIndex};
