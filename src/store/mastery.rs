//! Mastery goal collection

use super::keys::Collection;
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::MasteryGoal;

impl EssenceStore {
    /// All mastery goals, oldest first
    pub async fn mastery_goals(&self) -> Result<Vec<MasteryGoal>, StoreError> {
        self.get(Collection::MasteryGoals, Vec::new()).await
    }

    /// Upsert by id: replace the existing goal or append a new one
    pub async fn save_mastery_goal(&self, goal: MasteryGoal) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut goals = self.mastery_goals().await?;
        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(slot) => *slot = goal,
            None => goals.push(goal),
        }
        self.set(Collection::MasteryGoals, &goals).await
    }

    /// Remove a goal by id
    pub async fn delete_mastery_goal(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut goals = self.mastery_goals().await?;
        goals.retain(|g| g.id != id);
        self.set(Collection::MasteryGoals, &goals).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_util::open_temp;

    #[tokio::test]
    async fn save_appends_then_replaces_by_id() {
        let (_tmp, store) = open_temp();
        let goal = MasteryGoal::new("Piano", "piano, practice");
        let id = goal.id.clone();
        store.save_mastery_goal(goal).await.unwrap();
        assert_eq!(store.mastery_goals().await.unwrap().len(), 1);

        let mut edited = store.mastery_goals().await.unwrap().remove(0);
        edited.query = "piano, scales, hanon".into();
        store.save_mastery_goal(edited).await.unwrap();

        let goals = store.mastery_goals().await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id, id);
        assert_eq!(goals[0].query, "piano, scales, hanon");
    }

    #[tokio::test]
    async fn delete_by_id() {
        let (_tmp, store) = open_temp();
        let keep = MasteryGoal::new("Keep", "keep");
        let gone = MasteryGoal::new("Gone", "gone");
        let gone_id = gone.id.clone();
        store.save_mastery_goal(keep).await.unwrap();
        store.save_mastery_goal(gone).await.unwrap();

        store.delete_mastery_goal(&gone_id).await.unwrap();
        let goals = store.mastery_goals().await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "Keep");
    }
}
