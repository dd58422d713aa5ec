//! Dream board collection

use super::keys::Collection;
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::Dream;

impl EssenceStore {
    /// All dreams, oldest first
    pub async fn dreams(&self) -> Result<Vec<Dream>, StoreError> {
        self.get(Collection::Dreams, Vec::new()).await
    }

    /// Append one dream
    pub async fn add_dream(&self, dream: Dream) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut dreams = self.dreams().await?;
        dreams.push(dream);
        self.set(Collection::Dreams, &dreams).await
    }

    /// Replace an existing dream wholesale, matched by id. Unknown ids are
    /// a no-op.
    pub async fn update_dream(&self, dream: Dream) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut dreams = self.dreams().await?;
        if let Some(slot) = dreams.iter_mut().find(|d| d.id == dream.id) {
            *slot = dream;
            self.set(Collection::Dreams, &dreams).await?;
        }
        Ok(())
    }

    /// Remove a dream by id
    pub async fn delete_dream(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut dreams = self.dreams().await?;
        dreams.retain(|d| d.id != id);
        self.set(Collection::Dreams, &dreams).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_util::open_temp;

    #[tokio::test]
    async fn add_update_delete_dream() {
        let (_tmp, store) = open_temp();
        let dream = Dream::from_image_bytes("sailboat", "image/jpeg", b"fakejpeg");
        let id = dream.id.clone();
        store.add_dream(dream).await.unwrap();

        let mut updated = store.dreams().await.unwrap().remove(0);
        updated.title = "catamaran".into();
        store.update_dream(updated).await.unwrap();
        assert_eq!(store.dreams().await.unwrap()[0].title, "catamaran");

        store.delete_dream(&id).await.unwrap();
        assert!(store.dreams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_unknown_id_changes_nothing() {
        let (_tmp, store) = open_temp();
        store.add_dream(Dream::new("cabin", "data:,x")).await.unwrap();
        let stray = Dream::new("stray", "data:,y");
        store.update_dream(stray).await.unwrap();
        let dreams = store.dreams().await.unwrap();
        assert_eq!(dreams.len(), 1);
        assert_eq!(dreams[0].title, "cabin");
    }
}
