//! Daily plans, keyed by calendar date inside one map value
//!
//! The map key is the plan's `YYYY-MM-DD` date string, which both enforces
//! one-plan-per-date and makes plain string comparison a correct date
//! ordering for the future-scan operations (the format is zero-padded).

use std::collections::BTreeMap;

use super::keys::Collection;
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::{DailyPlan, TaskStat};

impl EssenceStore {
    /// The whole plan map, date -> plan
    pub async fn all_plans(&self) -> Result<BTreeMap<String, DailyPlan>, StoreError> {
        self.get(Collection::Plans, BTreeMap::new()).await
    }

    /// The plan for one date, if any
    pub async fn plan(&self, date: &str) -> Result<Option<DailyPlan>, StoreError> {
        let mut plans = self.all_plans().await?;
        Ok(plans.remove(date))
    }

    /// Replace the plan for its date
    pub async fn save_plan(&self, plan: DailyPlan) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut plans = self.all_plans().await?;
        plans.insert(plan.date.clone(), plan);
        self.set(Collection::Plans, &plans).await
    }

    /// Insert a batch of plans, merging into dates that already have one.
    ///
    /// A merge appends only tasks whose text is not already present verbatim
    /// on that day, so batch-creating a recurring task across N days never
    /// clobbers or duplicates what is already scheduled.
    pub async fn save_plans_bulk(&self, incoming: Vec<DailyPlan>) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut plans = self.all_plans().await?;
        for plan in incoming {
            match plans.get_mut(&plan.date) {
                Some(existing) => {
                    for task in plan.tasks {
                        if !existing.tasks.iter().any(|t| t.text == task.text) {
                            existing.tasks.push(task);
                        }
                    }
                }
                None => {
                    plans.insert(plan.date.clone(), plan);
                }
            }
        }
        self.set(Collection::Plans, &plans).await
    }

    /// Count distinct task texts across every plan dated `>= from_date`,
    /// most frequent first. Shown to the user before a bulk delete so they
    /// can see which recurring tasks would be affected.
    pub async fn future_task_stats(&self, from_date: &str) -> Result<Vec<TaskStat>, StoreError> {
        let plans = self.all_plans().await?;
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for (date, plan) in &plans {
            if date.as_str() < from_date {
                continue;
            }
            for task in &plan.tasks {
                *counts.entry(task.text.clone()).or_insert(0) += 1;
            }
        }
        let mut stats: Vec<TaskStat> = counts
            .into_iter()
            .map(|(text, count)| TaskStat { text, count })
            .collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
        Ok(stats)
    }

    /// Remove exact-text task matches from every plan dated `>= from_date`.
    /// Earlier plans keep their tasks, preserving historical completion
    /// records. Returns whether any plan was modified.
    pub async fn delete_tasks_from_date(
        &self,
        texts: &[String],
        from_date: &str,
    ) -> Result<bool, StoreError> {
        let _guard = self.lock_writes().await;
        let mut plans = self.all_plans().await?;
        let mut changed = false;
        for (date, plan) in plans.iter_mut() {
            if date.as_str() < from_date {
                continue;
            }
            let before = plan.tasks.len();
            plan.tasks.retain(|t| !texts.contains(&t.text));
            if plan.tasks.len() != before {
                changed = true;
            }
        }
        if changed {
            self.set(Collection::Plans, &plans).await?;
        }
        Ok(changed)
    }
}
