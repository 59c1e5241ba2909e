use async_trait::async_trait;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::documents::{load_document, upsert_document};
use vitalfolio_core::constants::SPENDING_COLLECTION;
use vitalfolio_core::errors::Result;
use vitalfolio_core::spending::{
    ExpenseEntry, MonthUpdate, MonthlySpending, SpendingRepositoryTrait,
};

/// One document per user per `YYYY-MM` month.
pub struct SpendingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SpendingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SpendingRepository { pool, writer }
    }
}

#[async_trait]
impl SpendingRepositoryTrait for SpendingRepository {
    fn load_month(&self, user_id: &str, month: &str) -> Result<Option<MonthlySpending>> {
        let mut conn = get_connection(&self.pool)?;
        match load_document(&mut conn, user_id, SPENDING_COLLECTION, month)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save_month(&self, user_id: &str, spending: MonthlySpending) -> Result<MonthlySpending> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MonthlySpending> {
                upsert_document(conn, &owner, SPENDING_COLLECTION, &spending.month, &spending)?;
                Ok(spending)
            })
            .await
    }

    async fn update_month(
        &self,
        user_id: &str,
        month: &str,
        update: MonthUpdate,
    ) -> Result<Option<ExpenseEntry>> {
        let owner = user_id.to_string();
        let month = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<ExpenseEntry>> {
                let mut spending = match load_document(conn, &owner, SPENDING_COLLECTION, &month)? {
                    Some(value) => serde_json::from_value(value)?,
                    None => MonthlySpending::new(month.as_str()),
                };
                let changed = update(&mut spending);
                if changed.is_some() {
                    upsert_document(conn, &owner, SPENDING_COLLECTION, &month, &spending)?;
                }
                Ok(changed)
            })
            .await
    }
}
