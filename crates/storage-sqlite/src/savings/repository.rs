use async_trait::async_trait;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::documents::{load_document, upsert_document};
use vitalfolio_core::constants::{
    RATE_HISTORY_COLLECTION, SAVINGS_COLLECTION, SINGLETON_DOCUMENT_ID,
};
use vitalfolio_core::errors::Result;
use vitalfolio_core::savings::{
    HistoryUpdate, RateEntry, RateHistory, SavingsData, SavingsRepositoryTrait,
};

/// Holdings and the rate history, one document each per user.
pub struct SavingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SavingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SavingsRepository { pool, writer }
    }
}

#[async_trait]
impl SavingsRepositoryTrait for SavingsRepository {
    fn load_savings(&self, user_id: &str) -> Result<Option<SavingsData>> {
        let mut conn = get_connection(&self.pool)?;
        match load_document(&mut conn, user_id, SAVINGS_COLLECTION, SINGLETON_DOCUMENT_ID)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save_savings(&self, user_id: &str, savings: SavingsData) -> Result<SavingsData> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsData> {
                upsert_document(
                    conn,
                    &owner,
                    SAVINGS_COLLECTION,
                    SINGLETON_DOCUMENT_ID,
                    &savings,
                )?;
                Ok(savings)
            })
            .await
    }

    fn load_rate_history(&self, user_id: &str) -> Result<RateHistory> {
        let mut conn = get_connection(&self.pool)?;
        match load_document(
            &mut conn,
            user_id,
            RATE_HISTORY_COLLECTION,
            SINGLETON_DOCUMENT_ID,
        )? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(RateHistory::new()),
        }
    }

    async fn save_rate_history(&self, user_id: &str, history: RateHistory) -> Result<()> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                upsert_document(
                    conn,
                    &owner,
                    RATE_HISTORY_COLLECTION,
                    SINGLETON_DOCUMENT_ID,
                    &history,
                )
            })
            .await
    }

    async fn update_rate_history(
        &self,
        user_id: &str,
        update: HistoryUpdate,
    ) -> Result<Option<RateEntry>> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<RateEntry>> {
                let mut history = match load_document(
                    conn,
                    &owner,
                    RATE_HISTORY_COLLECTION,
                    SINGLETON_DOCUMENT_ID,
                )? {
                    Some(value) => serde_json::from_value(value)?,
                    None => RateHistory::new(),
                };
                let changed = update(&mut history);
                if changed.is_some() {
                    upsert_document(
                        conn,
                        &owner,
                        RATE_HISTORY_COLLECTION,
                        SINGLETON_DOCUMENT_ID,
                        &history,
                    )?;
                }
                Ok(changed)
            })
            .await
    }
}
