use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::history::{HistoryItem, MonthGroup, RateHistory, TimelinePoint};
use super::rate_math::{compute_total_value, resolve_rates};
use super::savings_model::{AssetKind, AssetRates, RateEntry, RateInput, SavingsData};
use super::savings_traits::{SavingsRepositoryTrait, SavingsServiceTrait};
use crate::errors::Result;

pub struct SavingsService {
    repository: Arc<dyn SavingsRepositoryTrait>,
}

impl SavingsService {
    pub fn new(repository: Arc<dyn SavingsRepositoryTrait>) -> Self {
        SavingsService { repository }
    }
}

/// Freezes holdings and rates into a new history entry.
pub fn snapshot_entry(holdings: &SavingsData, rates: &AssetRates) -> RateEntry {
    RateEntry {
        id: Uuid::now_v7().to_string(),
        timestamp: Utc::now(),
        usd_rate: rates.usd_rate,
        gold18_rate: rates.gold18_rate,
        gold21_rate: rates.gold21_rate,
        gold24_rate: rates.gold24_rate,
        usd_amount: holdings.usd_amount,
        egp_amount: holdings.egp_amount,
        gold18_amount: holdings.gold18_amount,
        gold21_amount: holdings.gold21_amount,
        gold24_amount: holdings.gold24_amount,
        sum: compute_total_value(holdings, rates),
    }
}

#[async_trait]
impl SavingsServiceTrait for SavingsService {
    fn get_savings(&self, user_id: &str) -> Result<SavingsData> {
        Ok(self.repository.load_savings(user_id)?.unwrap_or_default())
    }

    async fn update_savings(&self, user_id: &str, savings: SavingsData) -> Result<SavingsData> {
        self.repository.save_savings(user_id, savings).await
    }

    async fn calculate(&self, user_id: &str, input: RateInput) -> Result<Option<RateEntry>> {
        let rates = resolve_rates(&input);
        if rates.is_empty() {
            debug!("No rates entered for user {}, skipping snapshot", user_id);
            return Ok(None);
        }

        let holdings = self.get_savings(user_id)?;
        let entry = snapshot_entry(&holdings, &rates);
        debug!("New valuation for user {}: {} EGP", user_id, entry.sum);

        self.repository
            .update_rate_history(
                user_id,
                Box::new(move |history: &mut RateHistory| {
                    history.append(entry.clone());
                    Some(entry)
                }),
            )
            .await
    }

    fn get_history(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<HistoryItem>> {
        let history = self.repository.load_rate_history(user_id)?;
        Ok(match limit {
            Some(n) => history.recent_with_trends(n),
            None => history.with_trends(),
        })
    }

    fn get_history_by_month(&self, user_id: &str) -> Result<Vec<MonthGroup>> {
        Ok(self.repository.load_rate_history(user_id)?.group_by_month())
    }

    async fn delete_history_entry(
        &self,
        user_id: &str,
        index: usize,
    ) -> Result<Option<RateEntry>> {
        let removed = self
            .repository
            .update_rate_history(
                user_id,
                Box::new(move |history: &mut RateHistory| history.delete_at(index)),
            )
            .await?;
        if removed.is_none() {
            debug!(
                "History index {} out of range for user {}, nothing deleted",
                index, user_id
            );
        }
        Ok(removed)
    }

    async fn clear_history(&self, user_id: &str) -> Result<usize> {
        let mut history = self.repository.load_rate_history(user_id)?;
        let removed = history.clear();
        self.repository.save_rate_history(user_id, history).await?;
        info!("Cleared {} history entries for user {}", removed, user_id);
        Ok(removed)
    }

    fn get_asset_timeline(&self, user_id: &str, asset: AssetKind) -> Result<Vec<TimelinePoint>> {
        Ok(self
            .repository
            .load_rate_history(user_id)?
            .asset_timeline(asset))
    }
}
