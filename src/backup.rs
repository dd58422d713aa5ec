//! Full-state snapshot export and restore
//!
//! A snapshot is one JSON document with one field per collection key (the
//! collection's current value, or null if it was never written) plus an
//! `exportDate` timestamp. The timestamp doubles as the validity gate on
//! import: a document without one is rejected before any write happens.
//!
//! Restoring is a full, destructive overwrite of local state. All writes go
//! through a single batch, so a restore either applies completely or not at
//! all; there is no partially-restored middle state to recover from. Null
//! collection values restore as absence, mirroring how they were exported.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::keys::Collection;
use crate::store::EssenceStore;

/// A full export of every collection plus its export timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
    #[serde(flatten)]
    pub collections: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Parse a backup document. A missing or malformed `exportDate` makes
    /// the whole file invalid.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw)
            .map_err(|e| StoreError::InvalidBackup(format!("not a valid backup file: {e}")))
    }

    pub fn to_pretty_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable backup file name with the export day embedded
    pub fn file_name(&self) -> String {
        format!(
            "Essence_Full_Backup_{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }
}

impl EssenceStore {
    /// Capture every known collection key, null for the ones never written
    pub async fn export_snapshot(&self) -> Result<Snapshot, StoreError> {
        let mut collections = BTreeMap::new();
        for collection in Collection::ALL {
            let value = self.raw_value(collection)?.unwrap_or(Value::Null);
            collections.insert(collection.key().to_string(), value);
        }
        Ok(Snapshot {
            export_date: Utc::now(),
            collections,
        })
    }

    /// Overwrite local state from a snapshot. Only known collection keys
    /// are applied; everything else in the document is ignored. The writes
    /// land atomically as one batch.
    ///
    /// A `null` export means the collection had never been written, so it
    /// restores as absence — storing the literal null would make every
    /// later typed read fail instead of falling back to its default.
    pub async fn restore_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut batch = sled::Batch::default();
        let mut applied = 0usize;
        for (key, value) in &snapshot.collections {
            let Some(collection) = Collection::from_key(key) else {
                debug!(key, "Ignoring unknown key in backup");
                continue;
            };
            if value.is_null() {
                batch.remove(collection.key().as_bytes());
            } else {
                batch.insert(collection.key().as_bytes(), serde_json::to_vec(value)?);
            }
            applied += 1;
        }
        self.db().apply_batch(batch)?;
        info!(applied, export_date = %snapshot.export_date, "Restored backup snapshot");
        Ok(())
    }

    /// Export a snapshot and write it under `dir` with its canonical file
    /// name. Returns the written path.
    pub async fn write_snapshot_file(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let snapshot = self.export_snapshot().await?;
        let path = dir.join(snapshot.file_name());
        tokio::fs::write(&path, snapshot.to_pretty_json()?).await?;
        info!(path = %path.display(), "Wrote backup snapshot");
        Ok(path)
    }

    /// Read, validate, and restore a snapshot file. Validation happens
    /// before any write, so an invalid file leaves local state untouched.
    pub async fn restore_snapshot_file(&self, path: &Path) -> Result<Snapshot, StoreError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot = Snapshot::from_json(&raw)?;
        self.restore_snapshot(&snapshot).await?;
        Ok(snapshot)
    }
}
