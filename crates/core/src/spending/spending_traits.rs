use async_trait::async_trait;

use super::spending_model::{ExpenseEntry, MonthlySpending, NewExpenseEntry, SpendingSummary};
use crate::errors::Result;

/// A change applied to one month. Returns the affected entry, or `None`
/// when nothing changed and the month should not be written.
pub type MonthUpdate = Box<dyn FnOnce(&mut MonthlySpending) -> Option<ExpenseEntry> + Send>;

/// Persistence contract for monthly expense documents keyed by `YYYY-MM`.
#[async_trait]
pub trait SpendingRepositoryTrait: Send + Sync {
    fn load_month(&self, user_id: &str, month: &str) -> Result<Option<MonthlySpending>>;
    async fn save_month(&self, user_id: &str, spending: MonthlySpending) -> Result<MonthlySpending>;

    /// Loads the month (or starts an empty one), applies `update` and saves
    /// the result, as a single write.
    async fn update_month(
        &self,
        user_id: &str,
        month: &str,
        update: MonthUpdate,
    ) -> Result<Option<ExpenseEntry>>;
}

#[async_trait]
pub trait SpendingServiceTrait: Send + Sync {
    async fn add_expense(&self, user_id: &str, entry: NewExpenseEntry) -> Result<ExpenseEntry>;
    async fn delete_expense(
        &self,
        user_id: &str,
        month: &str,
        entry_id: &str,
    ) -> Result<Option<ExpenseEntry>>;
    fn get_month(&self, user_id: &str, month: &str) -> Result<MonthlySpending>;
    fn get_summary(&self, user_id: &str, month: &str) -> Result<SpendingSummary>;
}
