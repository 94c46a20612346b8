use async_trait::async_trait;

use termscope_core::{ChunkFilter, Embedding, RetrievedChunk, VectorIndex};

use crate::RetrievalResult;

/// Seam the RAG orchestrator retrieves through, so chat flows can be
/// tested against fakes.
#[async_trait]
pub trait ChunkRetriever: Send + Sync {
    /// Never fails: retrieval trouble degrades to "no context found".
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> Vec<RetrievedChunk>;
}

pub struct Retriever<E, S> {
    embedder: E,
    index: S,
}

impl<E, S> Retriever<E, S>
where
    E: Embedding,
    S: VectorIndex,
{
    pub fn new(embedder: E, index: S) -> Self {
        Self { embedder, index }
    }

    /// Embeds the query and runs filtered kNN, returning ranked chunks
    /// with similarity scores. Embedding or backend failure is logged and
    /// mapped to an empty result set.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> Vec<RetrievedChunk> {
        match self.try_search(query, top_k, filter).await {
            Ok(results) => results,
            Err(error) => {
                tracing::warn!(error = %error, "retrieval failed, returning empty results");
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> RetrievalResult<Vec<RetrievedChunk>> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.index.search(&embedding, top_k, filter).await?;
        Ok(results)
    }
}

#[async_trait]
impl<E, S> ChunkRetriever for Retriever<E, S>
where
    E: Embedding + Send + Sync,
    S: VectorIndex + Send + Sync,
{
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&ChunkFilter>,
    ) -> Vec<RetrievedChunk> {
        self.search(query, top_k, filter).await
    }
}
