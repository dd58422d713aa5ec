//! Finance singleton: three-way income allocation
//!
//! Deposits distribute an incoming amount across the three running balances
//! proportionally to the ratio weights, leaving prior balances intact. The
//! old recalculate-from-scratch behavior (derive every balance from
//! `totalIncome` and discard history) is deliberately not offered; it
//! produces different balances from the same inputs and destroys the
//! accumulated record.

use super::keys::Collection;
use super::EssenceStore;
use crate::error::StoreError;
use crate::types::FinanceState;

impl EssenceStore {
    /// The finance singleton, with the stock 30/20/50 split on first read
    pub async fn finance(&self) -> Result<FinanceState, StoreError> {
        self.get(Collection::Finance, FinanceState::default()).await
    }

    /// Replace the singleton wholesale (ratio edits, manual balance fixes)
    pub async fn save_finance(&self, state: &FinanceState) -> Result<(), StoreError> {
        self.set(Collection::Finance, state).await
    }

    /// Split `amount` across the three balances by the current ratio
    /// weights and add to each. Non-positive amounts and an all-zero ratio
    /// sum leave the state untouched. Returns the resulting state.
    pub async fn deposit_income(&self, amount: f64) -> Result<FinanceState, StoreError> {
        let _guard = self.lock_writes().await;
        let mut state = self.finance().await?;
        let ratio_sum = state.ratios.sum();
        if amount > 0.0 && ratio_sum > 0.0 {
            state.allocations.fixed_savings += amount * state.ratios.fixed / ratio_sum;
            state.allocations.dream_savings += amount * state.ratios.dream / ratio_sum;
            state.allocations.desire_spending += amount * state.ratios.desire / ratio_sum;
            self.save_finance(&state).await?;
        }
        Ok(state)
    }
}
