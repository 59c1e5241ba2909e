use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::SqliteConnection;
use log::warn;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::documents::{
    delete_document, load_collection, load_document, upsert_document, DocumentRange,
};
use vitalfolio_core::calories::{
    migrate_daily_calorie_data, CalorieGoal, CalorieRepositoryTrait, DailyCalorieData, DayUpdate,
};
use vitalfolio_core::constants::{
    CALORIE_DAYS_COLLECTION, CALORIE_GOAL_COLLECTION, SINGLETON_DOCUMENT_ID,
};
use vitalfolio_core::errors::Result;

/// The calorie goal (one document) and one document per tracked day, keyed
/// by ISO date so that text ordering matches date ordering.
pub struct CalorieRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CalorieRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CalorieRepository { pool, writer }
    }
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl CalorieRepositoryTrait for CalorieRepository {
    fn load_goal(&self, user_id: &str) -> Result<Option<CalorieGoal>> {
        let mut conn = get_connection(&self.pool)?;
        match load_document(
            &mut conn,
            user_id,
            CALORIE_GOAL_COLLECTION,
            SINGLETON_DOCUMENT_ID,
        )? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save_goal(&self, user_id: &str, goal: CalorieGoal) -> Result<CalorieGoal> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CalorieGoal> {
                upsert_document(
                    conn,
                    &owner,
                    CALORIE_GOAL_COLLECTION,
                    SINGLETON_DOCUMENT_ID,
                    &goal,
                )?;
                Ok(goal)
            })
            .await
    }

    async fn delete_goal(&self, user_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                delete_document(conn, &owner, CALORIE_GOAL_COLLECTION, SINGLETON_DOCUMENT_ID)
            })
            .await
    }

    fn load_day(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyCalorieData>> {
        let mut conn = get_connection(&self.pool)?;
        load_document(&mut conn, user_id, CALORIE_DAYS_COLLECTION, &day_key(date))?
            .map(migrate_daily_calorie_data)
            .transpose()
    }

    fn load_days(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyCalorieData>> {
        let mut conn = get_connection(&self.pool)?;
        let range = DocumentRange {
            from: from.map(day_key),
            to: to.map(day_key),
        };

        let mut days = Vec::new();
        for (key, value) in load_collection(&mut conn, user_id, CALORIE_DAYS_COLLECTION, &range)? {
            match migrate_daily_calorie_data(value) {
                Ok(day) => days.push(day),
                // One unreadable day must not hide the rest of the ledger.
                Err(e) => warn!("Skipping calorie day {} for user {}: {}", key, user_id, e),
            }
        }
        Ok(days)
    }

    async fn save_day(&self, user_id: &str, day: DailyCalorieData) -> Result<DailyCalorieData> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DailyCalorieData> {
                upsert_document(
                    conn,
                    &owner,
                    CALORIE_DAYS_COLLECTION,
                    &day_key(day.date),
                    &day,
                )?;
                Ok(day)
            })
            .await
    }

    async fn update_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        calorie_limit: f64,
        update: DayUpdate,
    ) -> Result<DailyCalorieData> {
        let owner = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DailyCalorieData> {
                let key = day_key(date);
                let mut day = match load_document(conn, &owner, CALORIE_DAYS_COLLECTION, &key)? {
                    Some(value) => migrate_daily_calorie_data(value)?,
                    None => DailyCalorieData::new(date, calorie_limit),
                };
                if update(&mut day) {
                    upsert_document(conn, &owner, CALORIE_DAYS_COLLECTION, &key, &day)?;
                }
                Ok(day)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::Utc;
    use tempfile::tempdir;
    use vitalfolio_core::calories::{FoodEntry, DAILY_CALORIE_SCHEMA_VERSION};

    async fn create_test_repository() -> (CalorieRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (
            CalorieRepository::new(Arc::clone(&pool), writer),
            pool,
            temp_dir,
        )
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn goal() -> CalorieGoal {
        CalorieGoal {
            maintenance_calories: 2200.0,
            daily_calorie_limit: 1700.0,
            target_weight_loss: 0.5,
            total_calories_to_lose: 15400.0,
            created_at: Utc::now(),
            age: Some(35.0),
            weight: None,
            height: None,
            gender: None,
            body_fat: None,
            activity_level: None,
            goal: None,
            target_weight_change: None,
            target_weeks: None,
        }
    }

    fn day_with_food(day: u32, calories: f64) -> DailyCalorieData {
        let mut data = DailyCalorieData::new(date(day), 1700.0);
        data.add_food(FoodEntry {
            id: format!("food-{}", day),
            name: "Lunch".to_string(),
            calories,
            timestamp: Utc::now(),
            date: date(day),
        });
        data
    }

    #[tokio::test]
    async fn test_goal_save_load_delete() {
        let (repo, _pool, _dir) = create_test_repository().await;
        assert!(repo.load_goal("u1").unwrap().is_none());

        let saved = repo.save_goal("u1", goal()).await.unwrap();
        assert_eq!(repo.load_goal("u1").unwrap(), Some(saved));

        assert_eq!(repo.delete_goal("u1").await.unwrap(), 1);
        assert_eq!(repo.delete_goal("u1").await.unwrap(), 0);
        assert!(repo.load_goal("u1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_days_by_range() {
        let (repo, _pool, _dir) = create_test_repository().await;
        for (day, calories) in [(3, 500.0), (1, 300.0), (10, 800.0)] {
            repo.save_day("u1", day_with_food(day, calories)).await.unwrap();
        }
        repo.save_day("u2", day_with_food(2, 100.0)).await.unwrap();

        let all = repo.load_days("u1", None, None).unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(3), date(10)]);

        let window = repo.load_days("u1", Some(date(2)), Some(date(3))).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].total_calories, 500.0);

        assert_eq!(
            repo.load_day("u1", date(10)).unwrap().map(|d| d.remaining_calories),
            Some(900.0)
        );
        assert!(repo.load_day("u1", date(2)).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_day_is_atomic_per_write() {
        let (repo, _pool, _dir) = create_test_repository().await;
        let repo = Arc::new(repo);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.update_day(
                        "u1",
                        date(12),
                        1700.0,
                        Box::new(move |day: &mut DailyCalorieData| {
                            day.add_food(FoodEntry {
                                id: format!("food-{}", i),
                                name: "Snack".to_string(),
                                calories: 12.5,
                                timestamp: Utc::now(),
                                date: date(12),
                            });
                            true
                        }),
                    )
                    .await
                    .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let day = repo.load_day("u1", date(12)).unwrap().unwrap();
        assert_eq!(day.food_entries.len(), 20);
        assert_eq!(day.total_calories, 250.0);
        assert_eq!(day.remaining_calories, 1450.0);
    }

    #[tokio::test]
    async fn test_update_day_without_change_writes_nothing() {
        let (repo, _pool, _dir) = create_test_repository().await;
        let day = repo
            .update_day("u1", date(13), 1600.0, Box::new(|_: &mut DailyCalorieData| false))
            .await
            .unwrap();
        assert_eq!(day.calorie_limit, 1600.0);
        assert!(repo.load_day("u1", date(13)).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_day_is_migrated_on_load() {
        let (repo, pool, _dir) = create_test_repository().await;
        let legacy = serde_json::json!({
            "date": "2024-02-05",
            "foodEntries": [{"id": 1707100000000u64, "name": "Soup", "calories": 400}],
            "totalCalories": 400,
            "remainingCalories": 1400,
            "calorieLimit": 1800
        });
        {
            let mut conn = get_connection(&pool).unwrap();
            upsert_document(&mut conn, "u1", CALORIE_DAYS_COLLECTION, "2024-02-05", &legacy)
                .unwrap();
        }

        let day = repo.load_day("u1", date(5)).unwrap().unwrap();
        assert_eq!(day.schema_version, DAILY_CALORIE_SCHEMA_VERSION);
        assert_eq!(day.total_calories_burned, 0.0);
        assert!(day.exercise_entries.is_empty());
        assert_eq!(day.food_entries[0].id, "1707100000000");
        assert_eq!(day.remaining_calories, 1400.0);
    }
}
