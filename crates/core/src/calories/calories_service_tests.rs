//! Unit tests for the calorie service.

use super::*;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::{ledger_date_today, DEFAULT_LEDGER_TZ};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockCalorieRepository {
    goals: RwLock<HashMap<String, CalorieGoal>>,
    days: RwLock<HashMap<String, BTreeMap<NaiveDate, DailyCalorieData>>>,
    day_writes: RwLock<usize>,
}

#[async_trait]
impl CalorieRepositoryTrait for MockCalorieRepository {
    fn load_goal(&self, user_id: &str) -> Result<Option<CalorieGoal>> {
        Ok(self.goals.read().unwrap().get(user_id).cloned())
    }

    async fn save_goal(&self, user_id: &str, goal: CalorieGoal) -> Result<CalorieGoal> {
        self.goals
            .write()
            .unwrap()
            .insert(user_id.to_string(), goal.clone());
        Ok(goal)
    }

    async fn delete_goal(&self, user_id: &str) -> Result<usize> {
        Ok(self.goals.write().unwrap().remove(user_id).map_or(0, |_| 1))
    }

    fn load_day(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyCalorieData>> {
        Ok(self
            .days
            .read()
            .unwrap()
            .get(user_id)
            .and_then(|days| days.get(&date).cloned()))
    }

    fn load_days(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyCalorieData>> {
        let days = self.days.read().unwrap();
        Ok(days
            .get(user_id)
            .map(|days| {
                days.values()
                    .filter(|d| from.map_or(true, |f| d.date >= f))
                    .filter(|d| to.map_or(true, |t| d.date <= t))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn save_day(&self, user_id: &str, day: DailyCalorieData) -> Result<DailyCalorieData> {
        *self.day_writes.write().unwrap() += 1;
        self.days
            .write()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .insert(day.date, day.clone());
        Ok(day)
    }

    async fn update_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        calorie_limit: f64,
        update: DayUpdate,
    ) -> Result<DailyCalorieData> {
        let mut days = self.days.write().unwrap();
        let user_days = days.entry(user_id.to_string()).or_default();
        let mut day = user_days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyCalorieData::new(date, calorie_limit));
        if update(&mut day) {
            *self.day_writes.write().unwrap() += 1;
            user_days.insert(date, day.clone());
        }
        Ok(day)
    }
}

fn setup() -> (Arc<MockCalorieRepository>, CalorieService) {
    let repo = Arc::new(MockCalorieRepository::default());
    let service = CalorieService::new(repo.clone());
    (repo, service)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn goal_input(maintenance: f64, limit: f64, to_lose: f64) -> CalorieGoalInput {
    CalorieGoalInput {
        maintenance_calories: maintenance,
        daily_calorie_limit: limit,
        target_weight_loss: 0.5,
        total_calories_to_lose: to_lose,
    }
}

fn food(name: &str, calories: f64) -> NewFoodEntry {
    NewFoodEntry {
        name: name.to_string(),
        calories,
    }
}

fn exercise(name: &str, calories_burned: f64) -> NewExerciseEntry {
    NewExerciseEntry {
        name: name.to_string(),
        calories_burned,
        duration_minutes: 30.0,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_first_entry_creates_day_with_goal_limit() {
    let (_repo, service) = setup();
    service
        .set_goal("u1", goal_input(2200.0, 1700.0, 7700.0))
        .await
        .unwrap();

    let day = service.add_food("u1", date(1), food("Eggs", 300.0)).await.unwrap();
    assert_eq!(day.calorie_limit, 1700.0);
    assert_eq!(day.total_calories, 300.0);
    assert_eq!(day.remaining_calories, 1400.0);
    assert_eq!(day.food_entries[0].date, date(1));
}

#[tokio::test]
async fn test_day_without_goal_uses_zero_limit() {
    let (repo, service) = setup();
    let day = service.get_day("u1", date(2)).unwrap();
    assert_eq!(day.calorie_limit, 0.0);
    assert!(day.is_empty());
    // Reading never persists a day.
    assert_eq!(*repo.day_writes.read().unwrap(), 0);

    let day = service
        .add_exercise("u1", date(2), exercise("Walk", 150.0))
        .await
        .unwrap();
    assert_eq!(day.remaining_calories, 0.0);
    assert_eq!(day.total_calories_burned, 150.0);
}

#[tokio::test]
async fn test_delete_food_restores_totals() {
    let (_repo, service) = setup();
    service
        .set_goal("u1", goal_input(2000.0, 1500.0, 0.0))
        .await
        .unwrap();
    service.add_food("u1", date(3), food("Toast", 200.0)).await.unwrap();
    let day = service.add_food("u1", date(3), food("Cake", 450.0)).await.unwrap();
    let cake_id = day.food_entries[1].id.clone();

    let day = service.delete_food("u1", date(3), &cake_id).await.unwrap();
    assert_eq!(day.total_calories, 200.0);
    assert_eq!(day.remaining_calories, 1300.0);
    assert_eq!(day.food_entries.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_entry_writes_nothing() {
    let (repo, service) = setup();
    service
        .add_exercise("u1", date(4), exercise("Swim", 400.0))
        .await
        .unwrap();
    let writes = *repo.day_writes.read().unwrap();

    let day = service.delete_exercise("u1", date(4), "nope").await.unwrap();
    assert_eq!(day.total_calories_burned, 400.0);
    service.delete_food("u1", date(9), "nope").await.unwrap();
    assert_eq!(*repo.day_writes.read().unwrap(), writes);
}

#[tokio::test]
async fn test_concurrent_adds_keep_every_entry() {
    let (_repo, service) = setup();
    let service = Arc::new(service);
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .add_food("u1", date(6), food(&format!("Snack {}", i), 10.5))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let day = service.get_day("u1", date(6)).unwrap();
    assert_eq!(day.food_entries.len(), 16);
    assert_eq!(day.total_calories, 168.0);
}

#[tokio::test]
async fn test_fractional_add_and_delete_restores_day() {
    let (_repo, service) = setup();
    service
        .set_goal("u1", goal_input(2000.0, 2000.0, 0.0))
        .await
        .unwrap();
    let before = service.add_food("u1", date(7), food("Tea", 0.1)).await.unwrap();

    let day = service.add_food("u1", date(7), food("Biscuit", 0.2)).await.unwrap();
    let biscuit_id = day.food_entries[1].id.clone();
    let after = service.delete_food("u1", date(7), &biscuit_id).await.unwrap();

    assert_eq!(after.total_calories, before.total_calories);
    assert_eq!(after.remaining_calories, before.remaining_calories);
}

#[tokio::test]
async fn test_entry_validation() {
    let (_repo, service) = setup();
    let err = service
        .add_food("u1", date(1), food("   ", 100.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField(_))
    ));

    let err = service
        .add_exercise("u1", date(1), exercise("Run", -5.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_set_goal_keeps_created_at_and_updates_today() {
    let (_repo, service) = setup();
    let first = service
        .set_goal("u1", goal_input(2000.0, 1500.0, 3850.0))
        .await
        .unwrap();
    let today = ledger_date_today(DEFAULT_LEDGER_TZ);
    service.add_food("u1", today, food("Lunch", 600.0)).await.unwrap();
    service.add_food("u1", date(1), food("Old", 100.0)).await.unwrap();

    let second = service
        .set_goal("u1", goal_input(2100.0, 1800.0, 3850.0))
        .await
        .unwrap();
    assert_eq!(second.created_at, first.created_at);

    let today_day = service.get_day("u1", today).unwrap();
    assert_eq!(today_day.calorie_limit, 1800.0);
    assert_eq!(today_day.remaining_calories, 1200.0);
    if today != date(1) {
        assert_eq!(service.get_day("u1", date(1)).unwrap().calorie_limit, 1500.0);
    }
}

#[tokio::test]
async fn test_apply_profile_stores_calculated_goal() {
    let (_repo, service) = setup();
    let profile = CalorieProfile {
        age: 30.0,
        weight: 80.0,
        height: 180.0,
        gender: Gender::Male,
        body_fat: None,
        activity_level: ActivityLevel::Sedentary,
        goal: WeightGoal::Lose,
        target_weight_change: 5.0,
        target_weeks: 10.0,
    };

    let preview = service.preview_goal(&profile).unwrap();
    assert!(service.get_goal("u1").unwrap().is_none());

    let applied = service.apply_profile("u1", profile).await.unwrap();
    assert_eq!(applied.daily_calorie_limit, preview.daily_calorie_limit);
    assert_eq!(
        service.get_goal("u1").unwrap().unwrap().weight,
        Some(80.0)
    );
}

#[tokio::test]
async fn test_progress() {
    let (_repo, service) = setup();
    assert!(service.get_progress("u1").unwrap().is_none());

    service
        .set_goal("u1", goal_input(1600.0, 1200.0, 7700.0))
        .await
        .unwrap();
    service.add_food("u1", date(1), food("Feast", 1800.0)).await.unwrap();
    service
        .add_exercise("u1", date(1), exercise("Run", 300.0))
        .await
        .unwrap();
    service.add_food("u1", date(2), food("Salad", 1100.0)).await.unwrap();

    let progress = service.get_progress("u1").unwrap().unwrap();
    // Day one: 0 + 300. Day two: 500.
    assert_eq!(progress.achieved, 800.0);
    assert_eq!(progress.remaining, 6900.0);
    assert_eq!(progress.days_tracked, 2);
}

#[tokio::test]
async fn test_days_range_and_delete_goal() {
    let (_repo, service) = setup();
    for d in [1, 5, 9] {
        service.add_food("u1", date(d), food("Snack", 100.0)).await.unwrap();
    }
    let range = service.get_days("u1", Some(date(2)), Some(date(9))).unwrap();
    let dates: Vec<NaiveDate> = range.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(5), date(9)]);

    assert!(service.get_days("u1", Some(date(9)), Some(date(1))).is_err());

    service
        .set_goal("u1", goal_input(2000.0, 1500.0, 0.0))
        .await
        .unwrap();
    assert_eq!(service.delete_goal("u1").await.unwrap(), 1);
    assert_eq!(service.delete_goal("u1").await.unwrap(), 0);
}
