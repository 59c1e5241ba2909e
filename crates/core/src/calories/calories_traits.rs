use async_trait::async_trait;
use chrono::NaiveDate;

use super::calories_model::{
    CalorieGoal, CalorieGoalInput, CalorieProfile, DailyCalorieData, DeficitProgress,
    NewExerciseEntry, NewFoodEntry,
};
use crate::errors::Result;

/// A change applied to one stored day. Returns `false` when nothing changed
/// and the day should not be written.
pub type DayUpdate = Box<dyn FnOnce(&mut DailyCalorieData) -> bool + Send>;

/// Persistence contract for a user's calorie goal and daily ledgers.
#[async_trait]
pub trait CalorieRepositoryTrait: Send + Sync {
    fn load_goal(&self, user_id: &str) -> Result<Option<CalorieGoal>>;
    async fn save_goal(&self, user_id: &str, goal: CalorieGoal) -> Result<CalorieGoal>;
    async fn delete_goal(&self, user_id: &str) -> Result<usize>;

    /// Loads one day, migrating older record versions.
    fn load_day(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyCalorieData>>;

    /// Days within the inclusive range, oldest first. Open bounds are unbounded.
    fn load_days(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyCalorieData>>;
    async fn save_day(&self, user_id: &str, day: DailyCalorieData) -> Result<DailyCalorieData>;

    /// Loads the day (or starts one at `calorie_limit`), applies `update` and
    /// saves the result, as a single write. Returns the day as updated.
    async fn update_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        calorie_limit: f64,
        update: DayUpdate,
    ) -> Result<DailyCalorieData>;
}

#[async_trait]
pub trait CalorieServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: &str) -> Result<Option<CalorieGoal>>;

    /// Saves manually entered goal figures. An existing goal keeps its
    /// creation time.
    async fn set_goal(&self, user_id: &str, input: CalorieGoalInput) -> Result<CalorieGoal>;
    async fn delete_goal(&self, user_id: &str) -> Result<usize>;

    /// Computes a goal from a body profile without saving it.
    fn preview_goal(&self, profile: &CalorieProfile) -> Result<CalorieGoal>;
    async fn apply_profile(&self, user_id: &str, profile: CalorieProfile) -> Result<CalorieGoal>;

    /// The stored day, or an unsaved empty one at the current goal's limit.
    fn get_day(&self, user_id: &str, date: NaiveDate) -> Result<DailyCalorieData>;
    fn get_days(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyCalorieData>>;

    async fn add_food(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: NewFoodEntry,
    ) -> Result<DailyCalorieData>;
    async fn delete_food(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry_id: &str,
    ) -> Result<DailyCalorieData>;
    async fn add_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: NewExerciseEntry,
    ) -> Result<DailyCalorieData>;
    async fn delete_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry_id: &str,
    ) -> Result<DailyCalorieData>;

    /// `None` when the user has no goal.
    fn get_progress(&self, user_id: &str) -> Result<Option<DeficitProgress>>;
}
