use std::collections::HashSet;

use serde::Serialize;

use termscope_core::{PolicyType, RetrievedChunk};

/// One cited document, for UI display alongside an answer.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SourceRef {
    pub company_id: String,
    pub company_name: String,
    pub policy_type: PolicyType,
    pub label: String,
}

impl SourceRef {
    pub fn new(
        company_id: impl Into<String>,
        company_name: impl Into<String>,
        policy_type: PolicyType,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            company_name: company_name.into(),
            policy_type,
            label: policy_type.label().to_string(),
        }
    }
}

/// Collapses retrieved chunks into one citation per `(company_name,
/// policy_type)` pair, preserving first-seen order.
pub fn dedup_sources(chunks: &[RetrievedChunk]) -> Vec<SourceRef> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for chunk in chunks {
        if seen.insert((chunk.company_name.clone(), chunk.policy_type)) {
            sources.push(SourceRef::new(
                chunk.company_id.clone(),
                chunk.company_name.clone(),
                chunk.policy_type,
            ));
        }
    }
    sources
}
