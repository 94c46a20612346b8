use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PolicyType, Risk, StoreError};

/// Stored text plus analysis results for one of a company's documents.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyDocument {
    pub text: String,
    pub summary: String,
    pub risks: Vec<Risk>,
}

impl PolicyDocument {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub terms: PolicyDocument,
    pub cookie: PolicyDocument,
    pub privacy: PolicyDocument,
    pub last_updated: DateTime<Utc>,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            terms: PolicyDocument::default(),
            cookie: PolicyDocument::default(),
            privacy: PolicyDocument::default(),
            last_updated: Utc::now(),
        }
    }

    pub fn document(&self, policy_type: PolicyType) -> &PolicyDocument {
        match policy_type {
            PolicyType::Terms => &self.terms,
            PolicyType::Cookie => &self.cookie,
            PolicyType::Privacy => &self.privacy,
        }
    }

    pub fn document_mut(&mut self, policy_type: PolicyType) -> &mut PolicyDocument {
        match policy_type {
            PolicyType::Terms => &mut self.terms,
            PolicyType::Cookie => &mut self.cookie,
            PolicyType::Privacy => &mut self.privacy,
        }
    }
}

/// Record store for company metadata. The retrieval core only reads
/// `(id, name, document text)` from it; implementations live outside
/// this workspace's scope.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<CompanyRecord>, StoreError>;

    async fn list(&self) -> Result<Vec<CompanyRecord>, StoreError>;

    async fn put(&self, record: CompanyRecord) -> Result<(), StoreError>;

    /// Returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Writes analysis results for one document and bumps `last_updated`.
    async fn update_analysis(
        &self,
        id: &str,
        policy_type: PolicyType,
        summary: String,
        risks: Vec<Risk>,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_accessors_select_by_policy_type() {
        let mut record = CompanyRecord::new("Acme", "social");
        record.document_mut(PolicyType::Cookie).text = "cookie text".to_string();

        assert_eq!(record.document(PolicyType::Cookie).text, "cookie text");
        assert!(record.document(PolicyType::Terms).text.is_empty());
    }
}
