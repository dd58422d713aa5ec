//! Essence Store - local-first persistence for the Essence life-management data
//!
//! Every page of the app (time tracking, curated lists, dream board, finance
//! allocation, daily plans, mastery goals) reads and writes one named
//! collection through the typed helpers on [`EssenceStore`]. A collection is
//! a single JSON value under a fixed key in one flat keyspace; consistency
//! across collections is owned by the callers, not this layer.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/essence-store/
//! ├── essence.sled/          # The database, one flat keyspace
//! │                          #   essence_records, essence_dreams, ...
//! ├── legacy/                # Optional: old per-key JSON files,
//! │   └── <key>.json         #   read once on first run, never written
//! └── config.toml            # Configuration
//! ```
//!
//! ## First-run migration
//!
//! When the keyspace is empty the store probes the legacy directory for the
//! fixed set of collection keys and copies whatever parses as JSON. The
//! probe is best-effort (a bad file is logged and skipped) and one-way (the
//! legacy files stay behind as a redundant backup). On later opens the
//! keyspace is non-empty and the probe is skipped entirely.
//!
//! ## Backup
//!
//! [`EssenceStore::export_snapshot`] captures every collection into one JSON
//! document stamped with an `exportDate`; restoring validates the document
//! first and then overwrites local state in a single atomic batch.

pub mod backup;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-exports
pub use backup::Snapshot;
pub use config::Config;
pub use error::StoreError;
pub use store::keys::{Collection, ListKind};
pub use store::{EssenceStore, InspirationPack};
pub use types::{
    DailyPlan, DailyTask, Dream, FinanceAllocations, FinanceRatios, FinanceState, ListCategory,
    ListItem, MasteryGoal, RecordKind, TaskStat, WorkExpenseRecord,
};
