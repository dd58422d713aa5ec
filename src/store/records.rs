//! Work/expense record collection

use super::keys::Collection;
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::WorkExpenseRecord;

impl EssenceStore {
    /// All records, oldest first
    pub async fn records(&self) -> Result<Vec<WorkExpenseRecord>, StoreError> {
        self.get(Collection::Records, Vec::new()).await
    }

    /// Append one record
    pub async fn add_record(&self, record: WorkExpenseRecord) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut records = self.records().await?;
        records.push(record);
        self.set(Collection::Records, &records).await
    }

    /// Remove a record by id. Unknown ids are a no-op.
    pub async fn delete_record(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut records = self.records().await?;
        records.retain(|r| r.id != id);
        self.set(Collection::Records, &records).await
    }
}
