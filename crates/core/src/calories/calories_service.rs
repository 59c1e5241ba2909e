use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::calculator::calculate_goal;
use super::calories_model::{
    CalorieGoal, CalorieGoalInput, CalorieProfile, DailyCalorieData, DeficitProgress,
    ExerciseEntry, FoodEntry, NewExerciseEntry, NewFoodEntry,
};
use super::calories_traits::{CalorieRepositoryTrait, CalorieServiceTrait};
use super::ledger::deficit_progress;
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{ledger_date_today, DEFAULT_LEDGER_TZ};

pub struct CalorieService {
    repository: Arc<dyn CalorieRepositoryTrait>,
    timezone: Tz,
}

impl CalorieService {
    pub fn new(repository: Arc<dyn CalorieRepositoryTrait>) -> Self {
        Self::with_timezone(repository, DEFAULT_LEDGER_TZ)
    }

    /// `timezone` decides which calendar day counts as "today" when a new goal
    /// limit is applied to the current ledger.
    pub fn with_timezone(repository: Arc<dyn CalorieRepositoryTrait>, timezone: Tz) -> Self {
        CalorieService {
            repository,
            timezone,
        }
    }

    fn current_limit(&self, user_id: &str) -> Result<f64> {
        Ok(self
            .repository
            .load_goal(user_id)?
            .map(|goal| goal.daily_calorie_limit)
            .unwrap_or(0.0))
    }

    fn load_or_new_day(&self, user_id: &str, date: NaiveDate) -> Result<DailyCalorieData> {
        match self.repository.load_day(user_id, date)? {
            Some(day) => Ok(day),
            None => Ok(DailyCalorieData::new(date, self.current_limit(user_id)?)),
        }
    }

    /// Saves the goal and carries its limit onto today's ledger when one exists.
    async fn store_goal(&self, user_id: &str, goal: CalorieGoal) -> Result<CalorieGoal> {
        let saved = self.repository.save_goal(user_id, goal).await?;

        // A day started here already carries the new limit and is not written.
        let limit = saved.daily_calorie_limit;
        let today = ledger_date_today(self.timezone);
        self.repository
            .update_day(
                user_id,
                today,
                limit,
                Box::new(move |day: &mut DailyCalorieData| {
                    if day.calorie_limit == limit {
                        return false;
                    }
                    day.set_calorie_limit(limit);
                    true
                }),
            )
            .await?;
        Ok(saved)
    }
}

fn validate_entry(name: &str, values: &[(&str, f64)]) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    for (field, value) in values {
        if *value < 0.0 {
            return Err(
                ValidationError::InvalidInput(format!("{} cannot be negative", field)).into(),
            );
        }
    }
    Ok(name.to_string())
}

fn validate_goal_input(input: &CalorieGoalInput) -> Result<()> {
    let fields = [
        ("maintenanceCalories", input.maintenance_calories),
        ("dailyCalorieLimit", input.daily_calorie_limit),
        ("targetWeightLoss", input.target_weight_loss),
        ("totalCaloriesToLose", input.total_calories_to_lose),
    ];
    for (field, value) in fields {
        if value < 0.0 {
            return Err(
                ValidationError::InvalidInput(format!("{} cannot be negative", field)).into(),
            );
        }
    }
    Ok(())
}

#[async_trait]
impl CalorieServiceTrait for CalorieService {
    fn get_goal(&self, user_id: &str) -> Result<Option<CalorieGoal>> {
        self.repository.load_goal(user_id)
    }

    async fn set_goal(&self, user_id: &str, input: CalorieGoalInput) -> Result<CalorieGoal> {
        validate_goal_input(&input)?;
        let created_at = self
            .repository
            .load_goal(user_id)?
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);

        let goal = CalorieGoal {
            maintenance_calories: input.maintenance_calories,
            daily_calorie_limit: input.daily_calorie_limit,
            target_weight_loss: input.target_weight_loss,
            total_calories_to_lose: input.total_calories_to_lose,
            created_at,
            age: None,
            weight: None,
            height: None,
            gender: None,
            body_fat: None,
            activity_level: None,
            goal: None,
            target_weight_change: None,
            target_weeks: None,
        };
        self.store_goal(user_id, goal).await
    }

    async fn delete_goal(&self, user_id: &str) -> Result<usize> {
        let deleted = self.repository.delete_goal(user_id).await?;
        info!("Deleted calorie goal for user {} ({} rows)", user_id, deleted);
        Ok(deleted)
    }

    fn preview_goal(&self, profile: &CalorieProfile) -> Result<CalorieGoal> {
        calculate_goal(profile)
    }

    async fn apply_profile(&self, user_id: &str, profile: CalorieProfile) -> Result<CalorieGoal> {
        let mut goal = calculate_goal(&profile)?;
        if let Some(existing) = self.repository.load_goal(user_id)? {
            goal.created_at = existing.created_at;
        }
        debug!(
            "Calculated goal for user {}: maintenance {} kcal, limit {} kcal",
            user_id, goal.maintenance_calories, goal.daily_calorie_limit
        );
        self.store_goal(user_id, goal).await
    }

    fn get_day(&self, user_id: &str, date: NaiveDate) -> Result<DailyCalorieData> {
        self.load_or_new_day(user_id, date)
    }

    fn get_days(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyCalorieData>> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ValidationError::InvalidInput(format!(
                    "Invalid range: {} is after {}",
                    from, to
                ))
                .into());
            }
        }
        self.repository.load_days(user_id, from, to)
    }

    async fn add_food(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: NewFoodEntry,
    ) -> Result<DailyCalorieData> {
        let name = validate_entry(&entry.name, &[("calories", entry.calories)])?;
        let food = FoodEntry {
            id: Uuid::now_v7().to_string(),
            name,
            calories: entry.calories,
            timestamp: Utc::now(),
            date,
        };
        let limit = self.current_limit(user_id)?;
        let day = self
            .repository
            .update_day(
                user_id,
                date,
                limit,
                Box::new(move |day: &mut DailyCalorieData| {
                    day.add_food(food);
                    true
                }),
            )
            .await?;
        debug!(
            "User {} logged {} kcal on {}, {} remaining",
            user_id, entry.calories, date, day.remaining_calories
        );
        Ok(day)
    }

    async fn delete_food(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry_id: &str,
    ) -> Result<DailyCalorieData> {
        let limit = self.current_limit(user_id)?;
        let entry_id = entry_id.to_string();
        self.repository
            .update_day(
                user_id,
                date,
                limit,
                Box::new(move |day: &mut DailyCalorieData| {
                    let found = day.delete_food(&entry_id).is_some();
                    if !found {
                        debug!("Food entry {} not found on {}, nothing deleted", entry_id, date);
                    }
                    found
                }),
            )
            .await
    }

    async fn add_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: NewExerciseEntry,
    ) -> Result<DailyCalorieData> {
        let name = validate_entry(
            &entry.name,
            &[
                ("caloriesBurned", entry.calories_burned),
                ("durationMinutes", entry.duration_minutes),
            ],
        )?;
        let exercise = ExerciseEntry {
            id: Uuid::now_v7().to_string(),
            name,
            calories_burned: entry.calories_burned,
            duration_minutes: entry.duration_minutes,
            timestamp: Utc::now(),
            date,
        };
        let limit = self.current_limit(user_id)?;
        self.repository
            .update_day(
                user_id,
                date,
                limit,
                Box::new(move |day: &mut DailyCalorieData| {
                    day.add_exercise(exercise);
                    true
                }),
            )
            .await
    }

    async fn delete_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry_id: &str,
    ) -> Result<DailyCalorieData> {
        let limit = self.current_limit(user_id)?;
        let entry_id = entry_id.to_string();
        self.repository
            .update_day(
                user_id,
                date,
                limit,
                Box::new(move |day: &mut DailyCalorieData| {
                    let found = day.delete_exercise(&entry_id).is_some();
                    if !found {
                        debug!(
                            "Exercise entry {} not found on {}, nothing deleted",
                            entry_id, date
                        );
                    }
                    found
                }),
            )
            .await
    }

    fn get_progress(&self, user_id: &str) -> Result<Option<DeficitProgress>> {
        let goal = match self.repository.load_goal(user_id)? {
            Some(goal) => goal,
            None => return Ok(None),
        };
        let days = self.repository.load_days(user_id, None, None)?;
        Ok(Some(deficit_progress(&days, &goal)))
    }
}
