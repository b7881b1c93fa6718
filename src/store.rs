//! Append-only persistence for evaluation records.

#[path = "store/error.rs"]
mod error;

#[path = "store/record.rs"]
mod record;

#[path = "store/json_store.rs"]
mod json_store;

#[path = "store/memory.rs"]
mod memory;

#[path = "store/report.rs"]
mod report;

use async_trait::async_trait;

pub use error::StoreError;
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use record::EvaluationRecord;
pub use report::render_report;

/// Storage for evaluation records. Records are appended once and never
/// updated or deleted.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// Appends a record.
    async fn append(&self, record: &EvaluationRecord) -> Result<(), StoreError>;

    /// Every stored record, newest first.
    async fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError>;

    /// Records for one user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<EvaluationRecord>, StoreError> {
        let mut records = self.list_all().await?;
        records.retain(|record| record.result.user_id == user_id);
        Ok(records)
    }
}

pub(crate) fn newest_first(records: &mut [EvaluationRecord]) {
    records.sort_by(|a, b| b.result.timestamp.cmp(&a.result.timestamp));
}
