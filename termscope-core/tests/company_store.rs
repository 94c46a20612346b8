use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use termscope_core::{
    CompanyRecord, CompanyStore, PolicyDocument, PolicyType, Risk, Severity, StoreError,
};

/// Minimal in-memory record store, enough to exercise the trait contract.
#[derive(Default)]
struct InMemoryCompanyStore {
    records: Mutex<HashMap<String, CompanyRecord>>,
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn get(&self, id: &str) -> Result<Option<CompanyRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<CompanyRecord>, StoreError> {
        let mut records: Vec<CompanyRecord> =
            self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn put(&self, record: CompanyRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().unwrap().remove(id).is_some())
    }

    async fn update_analysis(
        &self,
        id: &str,
        policy_type: PolicyType,
        summary: String,
        risks: Vec<Risk>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(id) {
            let document = record.document_mut(policy_type);
            document.summary = summary;
            document.risks = risks;
            record.last_updated = Utc::now();
        }
        Ok(())
    }
}

#[tokio::test]
async fn put_then_get_round_trips_the_record() {
    let store = InMemoryCompanyStore::default();
    let mut record = CompanyRecord::new("Acme", "social");
    record.terms = PolicyDocument::with_text("terms text");
    let id = record.id.clone();

    store.put(record.clone()).await.unwrap();
    let fetched = store.get(&id).await.unwrap().unwrap();

    assert_eq!(fetched, record);
    assert_eq!(fetched.document(PolicyType::Terms).text, "terms text");
}

#[tokio::test]
async fn missing_record_is_none_and_delete_reports_existence() {
    let store = InMemoryCompanyStore::default();
    assert!(store.get("ghost").await.unwrap().is_none());
    assert!(!store.delete("ghost").await.unwrap());

    let record = CompanyRecord::new("Acme", "social");
    let id = record.id.clone();
    store.put(record).await.unwrap();
    assert!(store.delete(&id).await.unwrap());
    assert!(store.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_analysis_writes_one_document_and_bumps_last_updated() {
    let store = InMemoryCompanyStore::default();
    let record = CompanyRecord::new("Acme", "social");
    let id = record.id.clone();
    let created = record.last_updated;
    store.put(record).await.unwrap();

    let risks = vec![Risk {
        title: "Broad license".to_string(),
        description: "Content may be reused.".to_string(),
        severity: Severity::High,
    }];
    store
        .update_analysis(&id, PolicyType::Privacy, "Summary.".to_string(), risks.clone())
        .await
        .unwrap();

    let fetched = store.get(&id).await.unwrap().unwrap();
    assert_eq!(fetched.privacy.summary, "Summary.");
    assert_eq!(fetched.privacy.risks, risks);
    assert!(fetched.terms.summary.is_empty());
    assert!(fetched.last_updated >= created);
}

#[tokio::test]
async fn list_returns_all_records() {
    let store = InMemoryCompanyStore::default();
    store.put(CompanyRecord::new("Beta", "retail")).await.unwrap();
    store.put(CompanyRecord::new("Acme", "social")).await.unwrap();

    let names: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, ["Acme", "Beta"]);
}
