use serde::{Deserialize, Serialize};

use crate::PolicyType;

/// The unit persisted in the vector index: one contiguous segment of a
/// source document together with its embedding and owner metadata.
///
/// Exactly one live generation of chunks exists per `(company_id,
/// policy_type)` pair; re-indexing deletes the old generation before
/// inserting the new one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub company_id: String,
    pub company_name: String,
    pub policy_type: PolicyType,
    /// Zero-based position within the source document at index time.
    /// Not stable across re-indexing.
    pub chunk_index: usize,
    pub embedding: Option<Vec<f32>>,
}

/// A search hit: chunk content plus the similarity score computed at
/// query time. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievedChunk {
    pub text: String,
    pub company_id: String,
    pub company_name: String,
    pub policy_type: PolicyType,
    pub chunk_index: usize,
    pub score: f32,
}

/// Metadata restriction for search and delete-by-filter.
///
/// A missing `policy_type` widens a delete to all of the company's
/// documents; a missing `company_id` widens a search to the whole corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkFilter {
    pub company_id: Option<String>,
    pub policy_type: Option<PolicyType>,
}

impl ChunkFilter {
    pub fn company(company_id: impl Into<String>) -> Self {
        Self {
            company_id: Some(company_id.into()),
            policy_type: None,
        }
    }

    pub fn document(company_id: impl Into<String>, policy_type: PolicyType) -> Self {
        Self {
            company_id: Some(company_id.into()),
            policy_type: Some(policy_type),
        }
    }

    pub fn matches(&self, chunk: &Chunk) -> bool {
        if let Some(company_id) = &self.company_id {
            if chunk.company_id != *company_id {
                return false;
            }
        }
        if let Some(policy_type) = self.policy_type {
            if chunk.policy_type != policy_type {
                return false;
            }
        }
        true
    }
}
