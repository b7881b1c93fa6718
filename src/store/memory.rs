use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::record::EvaluationRecord;
use super::{newest_first, EvaluationStore};

/// Volatile store, for development runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<EvaluationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl EvaluationStore for MemoryStore {
    async fn append(&self, record: &EvaluationRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError> {
        let mut records = self.records.read().await.clone();
        newest_first(&mut records);
        Ok(records)
    }
}
