use uuid::Uuid;

use termscope_core::{Chunk, ChunkFilter, Embedding, PolicyType, VectorIndex};

use crate::{RetrievalError, TextChunker};

/// Outcome of one document-indexing run. `skipped` counts chunks whose
/// embedding or write failed and were left out of the new generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub indexed: usize,
    pub skipped: usize,
}

pub struct Indexer<E, S> {
    embedder: E,
    index: S,
    chunker: TextChunker,
}

impl<E, S> Indexer<E, S>
where
    E: Embedding,
    S: VectorIndex,
{
    pub fn new(embedder: E, index: S) -> Self {
        Self {
            embedder,
            index,
            chunker: TextChunker::default(),
        }
    }

    pub fn with_chunker(mut self, chunker: TextChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Replaces the live chunk generation for `(company_id, policy_type)`:
    /// deletes any prior chunks, then re-chunks, re-embeds and re-inserts
    /// the document. Idempotent and safe to re-run.
    ///
    /// A failed embed or write skips that chunk and continues; a failed
    /// delete aborts the run, since inserting on top of an unconfirmed
    /// delete could mix two generations. Concurrent calls for different
    /// `(company, policy)` pairs are independent; callers must serialize
    /// re-indexing of the same document.
    pub async fn index_document(
        &self,
        company_id: &str,
        company_name: &str,
        text: &str,
        policy_type: PolicyType,
    ) -> Result<IndexReport, RetrievalError> {
        let span = tracing::info_span!(
            "index_document",
            company_id = company_id,
            policy_type = policy_type.tag(),
        );
        let _guard = span.enter();

        self.index
            .delete_by_filter(&ChunkFilter::document(company_id, policy_type))
            .await?;

        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            return Ok(IndexReport::default());
        }

        let mut report = IndexReport::default();
        for (i, chunk_text) in chunks.into_iter().enumerate() {
            let embedding = match self.embedder.embed(&chunk_text).await {
                Ok(embedding) => embedding,
                Err(error) => {
                    tracing::warn!(chunk_index = i, error = %error, "skipping chunk: embedding failed");
                    report.skipped += 1;
                    continue;
                }
            };

            let chunk = Chunk {
                id: Uuid::new_v4().to_string(),
                text: chunk_text,
                company_id: company_id.to_string(),
                company_name: company_name.to_string(),
                policy_type,
                chunk_index: i,
                embedding: Some(embedding),
            };

            match self.index.upsert(chunk).await {
                Ok(()) => report.indexed += 1,
                Err(error) => {
                    tracing::warn!(chunk_index = i, error = %error, "skipping chunk: upsert failed");
                    report.skipped += 1;
                }
            }
        }

        if let Err(error) = self.index.refresh().await {
            tracing::warn!(error = %error, "index refresh failed");
        }

        Ok(report)
    }
}
