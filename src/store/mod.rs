//! The persistent key-value store behind every collection
//!
//! One sled database, one flat keyspace, JSON values. Each collection is a
//! single value under a fixed key from [`keys::Collection`]; the typed
//! helpers in the sibling modules are thin read-modify-write wrappers over
//! [`EssenceStore::get`] / [`EssenceStore::set`].
//!
//! On first open the keyspace is empty and the store probes the legacy
//! directory of `<key>.json` files, copying whatever parses. The legacy files
//! are never touched afterwards, so they remain a redundant backup.

pub mod keys;

mod dreams;
mod finance;
mod lists;
mod mastery;
mod plans;
mod records;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::StoreError;
use keys::Collection;

pub use lists::InspirationPack;

static SHARED: OnceCell<EssenceStore> = OnceCell::const_new();

/// Handle to the local database
pub struct EssenceStore {
    db: sled::Db,
    /// Serializes read-modify-write cycles so an in-flight append cannot be
    /// clobbered by an overlapping one in the same process.
    write_lock: Mutex<()>,
}

impl EssenceStore {
    /// Open or create the database, running the legacy migration probe if
    /// the keyspace is empty
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let db = sled::open(config.db_path())?;
        info!(path = %config.db_path().display(), "Opened essence database");

        if db.is_empty() {
            migrate_legacy(&db, &config.legacy_data_dir())?;
        } else {
            debug!("Keyspace not empty, skipping legacy probe");
        }

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// Process-wide memoized handle. Concurrent callers await the one
    /// initialization; the config only matters for whichever call gets
    /// there first.
    pub async fn shared(config: &Config) -> Result<&'static EssenceStore, StoreError> {
        SHARED
            .get_or_try_init(|| async { Self::open(config) })
            .await
    }

    /// Read a collection value, or `default` if the key is absent.
    /// Missing keys never fail; only I/O or decode errors do.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        default: T,
    ) -> Result<T, StoreError> {
        match self.db.get(collection.key().as_bytes())? {
            Some(raw) => Ok(serde_json::from_slice(&raw)?),
            None => Ok(default),
        }
    }

    /// Replace the full value at a collection key. Last write wins.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(value)?;
        self.db.insert(collection.key().as_bytes(), raw)?;
        Ok(())
    }

    /// Read a collection as raw JSON, `None` if absent. Used by the
    /// snapshot exporter and the stats command.
    pub fn raw_value(&self, collection: Collection) -> Result<Option<Value>, StoreError> {
        match self.db.get(collection.key().as_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn db(&self) -> &sled::Db {
        &self.db
    }

    pub(crate) async fn lock_writes(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

/// Copy parseable legacy entries into an empty keyspace.
///
/// Best-effort and one-directional: a key that fails to parse is logged and
/// skipped, and the legacy files are never deleted.
fn migrate_legacy(db: &sled::Db, legacy_dir: &Path) -> Result<(), StoreError> {
    if !legacy_dir.is_dir() {
        debug!(path = %legacy_dir.display(), "No legacy directory, skipping migration");
        return Ok(());
    }

    let mut migrated = 0usize;
    for collection in Collection::ALL {
        let path = legacy_dir.join(format!("{}.json", collection.key()));
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                warn!(key = collection.key(), error = %e, "Failed to read legacy entry, skipping");
                continue;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            // a literal null holds no data, and storing it would poison
            // every later typed read of the collection
            Ok(Value::Null) => {
                debug!(key = collection.key(), "Legacy entry is null, skipping");
            }
            Ok(value) => {
                db.insert(collection.key().as_bytes(), serde_json::to_vec(&value)?)?;
                migrated += 1;
            }
            Err(e) => {
                warn!(key = collection.key(), error = %e, "Failed to parse legacy entry, skipping");
            }
        }
    }

    if migrated > 0 {
        info!(migrated, "Migrated legacy data into essence database");
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_util::{config_for, open_temp};
    use super::*;
    use crate::types::ListItem;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_default_for_missing_key() {
        let (_tmp, store) = open_temp();
        let items: Vec<ListItem> = store.get(Collection::Ideas, Vec::new()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (_tmp, store) = open_temp();
        let items = vec![ListItem::new("write more tests")];
        store.set(Collection::Ideas, &items).await.unwrap();
        let back: Vec<ListItem> = store.get(Collection::Ideas, Vec::new()).await.unwrap();
        assert_eq!(back, items);
    }

    fn write_legacy(tmp: &TempDir, key: &str, body: &str) {
        let dir = tmp.path().join("legacy");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{key}.json")), body).unwrap();
    }

    #[tokio::test]
    async fn migration_copies_parseable_keys_and_skips_bad_ones() {
        let tmp = TempDir::new().unwrap();
        write_legacy(&tmp, "essence_success", r#"[{"id":"1","text":"shipped","createdAt":"2024-01-01T00:00:00Z"}]"#);
        write_legacy(&tmp, "essence_ideas", "{not json");

        let store = EssenceStore::open(&config_for(&tmp)).unwrap();
        let success: Vec<ListItem> = store.get(Collection::Success, Vec::new()).await.unwrap();
        assert_eq!(success.len(), 1);
        assert_eq!(success[0].text, "shipped");
        // the unparseable key was skipped, not migrated and not fatal
        assert!(store.raw_value(Collection::Ideas).unwrap().is_none());
        // legacy files are left in place as a redundant backup
        assert!(tmp.path().join("legacy/essence_ideas.json").exists());
    }

    #[tokio::test]
    async fn migration_is_a_noop_once_keyspace_is_populated() {
        let tmp = TempDir::new().unwrap();
        write_legacy(&tmp, "essence_success", r#"[{"id":"1","text":"first","createdAt":"2024-01-01T00:00:00Z"}]"#);

        {
            let store = EssenceStore::open(&config_for(&tmp)).unwrap();
            let mut success: Vec<ListItem> =
                store.get(Collection::Success, Vec::new()).await.unwrap();
            success.push(ListItem::new("second"));
            store.set(Collection::Success, &success).await.unwrap();
        }

        // second open: keyspace is non-empty, so the probe must not re-copy
        // the legacy value over the newer one
        let store = EssenceStore::open(&config_for(&tmp)).unwrap();
        let success: Vec<ListItem> = store.get(Collection::Success, Vec::new()).await.unwrap();
        assert_eq!(success.len(), 2);
    }

    #[tokio::test]
    async fn null_legacy_entries_are_left_out_of_the_keyspace() {
        let tmp = TempDir::new().unwrap();
        write_legacy(&tmp, "essence_dreams", "null");
        write_legacy(&tmp, "essence_success", "[]");

        let store = EssenceStore::open(&config_for(&tmp)).unwrap();
        assert!(store.raw_value(Collection::Dreams).unwrap().is_none());
        assert!(store.dreams().await.unwrap().is_empty());
        assert!(store.raw_value(Collection::Success).unwrap().is_some());
    }

    // the one test that touches the process-wide SHARED cell
    #[tokio::test]
    async fn shared_handle_is_initialized_once() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp);
        let (a, b) = tokio::join!(
            EssenceStore::shared(&config),
            EssenceStore::shared(&config)
        );
        let a = a.unwrap();
        let b = b.unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[tokio::test]
    async fn migration_without_legacy_dir_is_fine() {
        let tmp = TempDir::new().unwrap();
        let store = EssenceStore::open(&config_for(&tmp)).unwrap();
        assert!(store.raw_value(Collection::Records).unwrap().is_none());
    }
}
