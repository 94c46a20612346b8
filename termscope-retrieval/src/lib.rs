mod chunker;
mod error;
mod hash_embedder;
mod in_memory;
mod indexer;
mod retriever;

pub use chunker::{ChunkerConfigError, TextChunker};
pub use error::{RetrievalError, RetrievalResult};
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorIndex;
pub use indexer::{IndexReport, Indexer};
pub use retriever::{ChunkRetriever, Retriever};
