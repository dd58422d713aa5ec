//! The four curated lists (not-to-do, success, ideas, inspiration)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keys::{Collection, ListKind};
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::{ListCategory, ListItem};

/// Standalone export of the inspiration list, downloadable on its own
/// without a full backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspirationPack {
    pub inspiration: Vec<ListItem>,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
    pub note: String,
}

impl EssenceStore {
    /// All items of one list kind, oldest first
    pub async fn list(&self, kind: ListKind) -> Result<Vec<ListItem>, StoreError> {
        self.get(kind.collection(), Vec::new()).await
    }

    /// Items of one list kind carrying a given category tag. In practice
    /// only the inspiration list is tagged.
    pub async fn list_by_category(
        &self,
        kind: ListKind,
        category: ListCategory,
    ) -> Result<Vec<ListItem>, StoreError> {
        let items = self.list(kind).await?;
        Ok(items
            .into_iter()
            .filter(|i| i.category == Some(category))
            .collect())
    }

    /// Append one item to a list
    pub async fn add_list_item(&self, kind: ListKind, item: ListItem) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut items = self.list(kind).await?;
        items.push(item);
        self.set(kind.collection(), &items).await
    }

    /// Remove a list item by id. Unknown ids are a no-op.
    pub async fn delete_list_item(&self, kind: ListKind, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut items = self.list(kind).await?;
        items.retain(|i| i.id != id);
        self.set(kind.collection(), &items).await
    }

    /// Record a break of a not-to-do rule by appending the current instant
    /// to the item's break log
    pub async fn add_break(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut items = self.list(ListKind::NotToDo).await?;
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.breaks.get_or_insert_with(Vec::new).push(Utc::now());
            self.set(Collection::NotToDo, &items).await?;
        }
        Ok(())
    }

    /// Bundle the inspiration list for standalone download
    pub async fn export_inspiration_pack(&self) -> Result<InspirationPack, StoreError> {
        Ok(InspirationPack {
            inspiration: self.list(ListKind::Inspiration).await?,
            export_date: Utc::now(),
            note: "Essence Inspiration Pack".to_string(),
        })
    }
}
