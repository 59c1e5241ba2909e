use async_trait::async_trait;

use super::history::{HistoryItem, MonthGroup, RateHistory, TimelinePoint};
use super::savings_model::{AssetKind, RateEntry, RateInput, SavingsData};
use crate::errors::Result;

/// Edits a loaded history in place; the history is saved only when it returns an entry.
pub type HistoryUpdate = Box<dyn FnOnce(&mut RateHistory) -> Option<RateEntry> + Send>;

/// Persistence contract for a user's holdings and rate history.
#[async_trait]
pub trait SavingsRepositoryTrait: Send + Sync {
    fn load_savings(&self, user_id: &str) -> Result<Option<SavingsData>>;
    async fn save_savings(&self, user_id: &str, savings: SavingsData) -> Result<SavingsData>;
    fn load_rate_history(&self, user_id: &str) -> Result<RateHistory>;
    async fn save_rate_history(&self, user_id: &str, history: RateHistory) -> Result<()>;
    /// Loads, edits and saves the history as one write.
    async fn update_rate_history(
        &self,
        user_id: &str,
        update: HistoryUpdate,
    ) -> Result<Option<RateEntry>>;
}

#[async_trait]
pub trait SavingsServiceTrait: Send + Sync {
    fn get_savings(&self, user_id: &str) -> Result<SavingsData>;
    async fn update_savings(&self, user_id: &str, savings: SavingsData) -> Result<SavingsData>;

    /// Snapshots current holdings at the given rates. Returns `None` and stores
    /// nothing when every rate is zero.
    async fn calculate(&self, user_id: &str, input: RateInput) -> Result<Option<RateEntry>>;

    /// Full history when `limit` is `None`, otherwise the `limit` newest entries.
    fn get_history(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<HistoryItem>>;
    fn get_history_by_month(&self, user_id: &str) -> Result<Vec<MonthGroup>>;
    async fn delete_history_entry(&self, user_id: &str, index: usize)
        -> Result<Option<RateEntry>>;
    async fn clear_history(&self, user_id: &str) -> Result<usize>;
    fn get_asset_timeline(&self, user_id: &str, asset: AssetKind) -> Result<Vec<TimelinePoint>>;
}
