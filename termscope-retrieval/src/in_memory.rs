use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use termscope_core::{
    Chunk, ChunkFilter, IndexStats, RetrievedChunk, StoreError, VectorIndex,
};

#[derive(Default)]
struct IndexInner {
    chunks: Vec<Option<Chunk>>,
    embeddings: Vec<Option<Vec<f32>>>,
    id_map: HashMap<String, usize>,
}

/// Brute-force cosine-kNN index over a fixed embedding dimension.
///
/// Filters are applied before scoring, so a filtered query ranks the
/// exact eligible set rather than truncating a global ranking.
#[derive(Clone)]
pub struct InMemoryVectorIndex {
    dimension: usize,
    inner: Arc<RwLock<IndexInner>>,
}

impl InMemoryVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            inner: Arc::new(RwLock::new(IndexInner::default())),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait::async_trait]
impl VectorIndex for InMemoryVectorIndex {
    /// The backing store needs no schema; racing callers all succeed.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn upsert(&self, mut chunk: Chunk) -> Result<(), StoreError> {
        if chunk.id.trim().is_empty() {
            return Err(StoreError::InvalidId(chunk.id));
        }

        let embedding = chunk.embedding.take().ok_or_else(|| {
            StoreError::Internal(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "missing embedding",
            )))
        })?;
        if embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                got: embedding.len(),
            });
        }

        let mut inner = self.inner.write().await;
        if let Some(&index) = inner.id_map.get(&chunk.id) {
            inner.chunks[index] = Some(chunk);
            inner.embeddings[index] = Some(embedding);
        } else {
            let index = inner.chunks.len();
            inner.id_map.insert(chunk.id.clone(), index);
            inner.chunks.push(Some(chunk));
            inner.embeddings.push(Some(embedding));
        }
        Ok(())
    }

    async fn delete_by_filter(&self, filter: &ChunkFilter) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let mut removed = Vec::new();
        for (idx, slot) in inner.chunks.iter_mut().enumerate() {
            let Some(chunk) = slot.as_ref() else { continue };
            if filter.matches(chunk) {
                removed.push((idx, chunk.id.clone()));
                *slot = None;
            }
        }
        for (idx, id) in removed {
            inner.embeddings[idx] = None;
            inner.id_map.remove(&id);
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> Result<Vec<RetrievedChunk>, StoreError> {
        if query_embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                got: query_embedding.len(),
            });
        }

        let inner = self.inner.read().await;
        let mut scored = Vec::new();
        for (idx, embedding) in inner.embeddings.iter().enumerate() {
            let Some(embedding) = embedding else { continue };
            let Some(chunk) = inner.chunks[idx].as_ref() else {
                continue;
            };
            if let Some(filter) = filter {
                if !filter.matches(chunk) {
                    continue;
                }
            }
            let mut score = cosine_similarity(query_embedding, embedding);
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            scored.push(RetrievedChunk {
                text: chunk.text.clone(),
                company_id: chunk.company_id.clone(),
                company_name: chunk.company_name.clone(),
                policy_type: chunk.policy_type,
                chunk_index: chunk.chunk_index,
                score,
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    /// Writes are visible immediately; nothing to do.
    async fn refresh(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats, StoreError> {
        let inner = self.inner.read().await;
        let mut stats = IndexStats::default();
        let mut companies = HashSet::new();
        for chunk in inner.chunks.iter().flatten() {
            stats.total_chunks += 1;
            *stats
                .chunks_by_policy_type
                .entry(chunk.policy_type)
                .or_insert(0) += 1;
            companies.insert(chunk.company_id.clone());
        }
        stats.unique_companies = companies.len();
        Ok(stats)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
