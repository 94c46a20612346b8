use std::collections::HashMap;

use async_trait::async_trait;

use crate::{Chunk, ChunkFilter, PolicyType, RetrievedChunk, StoreError};

/// Aggregate counts for observability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexStats {
    pub total_chunks: usize,
    pub chunks_by_policy_type: HashMap<PolicyType, usize>,
    pub unique_companies: usize,
}

/// Durable store of [`Chunk`]s with cosine-similarity kNN search.
///
/// `search` must apply the filter before ranking (filtered kNN), never
/// rank-then-discard, so a filtered query returns up to `top_k` eligible
/// hits whenever that many exist.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Idempotent. Creates the backing index/collection if absent;
    /// concurrent callers racing to create it must all succeed.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    async fn upsert(&self, chunk: Chunk) -> Result<(), StoreError>;

    /// Removes every chunk matching `filter`. Matching zero chunks is a
    /// no-op, not an error.
    async fn delete_by_filter(&self, filter: &ChunkFilter) -> Result<(), StoreError>;

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> Result<Vec<RetrievedChunk>, StoreError>;

    /// Makes writes since the last refresh visible to `search`. No-op for
    /// backends without a visibility delay.
    async fn refresh(&self) -> Result<(), StoreError>;

    async fn stats(&self) -> Result<IndexStats, StoreError>;
}
