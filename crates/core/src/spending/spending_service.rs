use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::spending_model::{
    summarize, ExpenseEntry, MonthlySpending, NewExpenseEntry, SpendingSummary,
};
use super::spending_traits::{SpendingRepositoryTrait, SpendingServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{month_key, parse_month_key, previous_month_key};

pub struct SpendingService {
    repository: Arc<dyn SpendingRepositoryTrait>,
}

impl SpendingService {
    pub fn new(repository: Arc<dyn SpendingRepositoryTrait>) -> Self {
        SpendingService { repository }
    }

    fn load_or_new_month(&self, user_id: &str, month: &str) -> Result<MonthlySpending> {
        Ok(self
            .repository
            .load_month(user_id, month)?
            .unwrap_or_else(|| MonthlySpending::new(month)))
    }
}

/// Normalizes a user supplied month to `YYYY-MM`.
fn canonical_month(month: &str) -> Result<String> {
    Ok(month_key(parse_month_key(month)?))
}

fn validate_expense(entry: &NewExpenseEntry) -> Result<()> {
    if entry.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if entry.amount < Decimal::ZERO {
        return Err(ValidationError::InvalidInput("amount cannot be negative".to_string()).into());
    }
    Ok(())
}

#[async_trait]
impl SpendingServiceTrait for SpendingService {
    async fn add_expense(&self, user_id: &str, entry: NewExpenseEntry) -> Result<ExpenseEntry> {
        validate_expense(&entry)?;
        let month = month_key(entry.date);
        let expense = ExpenseEntry {
            id: Uuid::now_v7().to_string(),
            name: entry.name.trim().to_string(),
            amount: entry.amount,
            category: entry.category.trim().to_string(),
            kind: entry.kind,
            date: entry.date,
            notes: entry.notes.filter(|n| !n.trim().is_empty()),
        };

        let stored = expense.clone();
        self.repository
            .update_month(
                user_id,
                &month,
                Box::new(move |spending: &mut MonthlySpending| {
                    spending.add_expense(stored.clone());
                    Some(stored)
                }),
            )
            .await?;
        debug!(
            "User {} recorded {} expense of {} in {}",
            user_id, expense.kind, expense.amount, month
        );
        Ok(expense)
    }

    async fn delete_expense(
        &self,
        user_id: &str,
        month: &str,
        entry_id: &str,
    ) -> Result<Option<ExpenseEntry>> {
        let month = canonical_month(month)?;
        let entry_id = entry_id.to_string();
        let label = month.clone();
        self.repository
            .update_month(
                user_id,
                &month,
                Box::new(move |spending: &mut MonthlySpending| {
                    let removed = spending.delete_expense(&entry_id);
                    if removed.is_none() {
                        debug!("Expense {} not found in {}, nothing deleted", entry_id, label);
                    }
                    removed
                }),
            )
            .await
    }

    fn get_month(&self, user_id: &str, month: &str) -> Result<MonthlySpending> {
        let month = canonical_month(month)?;
        self.load_or_new_month(user_id, &month)
    }

    fn get_summary(&self, user_id: &str, month: &str) -> Result<SpendingSummary> {
        let month = canonical_month(month)?;
        let current = self.load_or_new_month(user_id, &month)?;
        let previous_total = self
            .repository
            .load_month(user_id, &previous_month_key(&month)?)?
            .map(|previous| previous.total());
        Ok(summarize(&month, &current.entries, previous_total))
    }
}
