//! Per-day calorie aggregates and the cross-day deficit rollup.

use chrono::NaiveDate;

use super::calories_model::{CalorieGoal, DailyCalorieData, DeficitProgress, ExerciseEntry, FoodEntry};
use super::migration::DAILY_CALORIE_SCHEMA_VERSION;
use crate::constants::KCAL_PER_KG;

impl DailyCalorieData {
    /// An empty day with the limit in force when it was first touched.
    pub fn new(date: NaiveDate, calorie_limit: f64) -> Self {
        DailyCalorieData {
            schema_version: DAILY_CALORIE_SCHEMA_VERSION,
            date,
            food_entries: Vec::new(),
            exercise_entries: Vec::new(),
            total_calories: 0.0,
            total_calories_burned: 0.0,
            remaining_calories: calorie_limit,
            calorie_limit,
        }
    }

    pub fn add_food(&mut self, entry: FoodEntry) {
        self.food_entries.push(entry);
        self.refresh_totals();
    }

    /// Exercise is tracked toward the deficit goal only; it never raises the
    /// day's remaining allowance.
    pub fn add_exercise(&mut self, entry: ExerciseEntry) {
        self.exercise_entries.push(entry);
        self.refresh_totals();
    }

    /// Removes a food entry. Unknown ids are ignored.
    pub fn delete_food(&mut self, id: &str) -> Option<FoodEntry> {
        let position = self.food_entries.iter().position(|e| e.id == id)?;
        let removed = self.food_entries.remove(position);
        self.refresh_totals();
        Some(removed)
    }

    /// Removes an exercise entry. Unknown ids are ignored.
    pub fn delete_exercise(&mut self, id: &str) -> Option<ExerciseEntry> {
        let position = self.exercise_entries.iter().position(|e| e.id == id)?;
        let removed = self.exercise_entries.remove(position);
        self.refresh_totals();
        Some(removed)
    }

    pub fn set_calorie_limit(&mut self, calorie_limit: f64) {
        self.calorie_limit = calorie_limit;
        self.refresh_remaining();
    }

    pub fn is_empty(&self) -> bool {
        self.food_entries.is_empty() && self.exercise_entries.is_empty()
    }

    /// Totals are summed from the entry lists in order, so the same entries
    /// always give bit-identical totals.
    fn refresh_totals(&mut self) {
        self.total_calories = self
            .food_entries
            .iter()
            .fold(0.0, |total, e| total + e.calories);
        self.total_calories_burned = self
            .exercise_entries
            .iter()
            .fold(0.0, |total, e| total + e.calories_burned);
        self.refresh_remaining();
    }

    fn refresh_remaining(&mut self) {
        self.remaining_calories = self.calorie_limit - self.total_calories;
    }
}

/// Food deficit against maintenance (never below zero) plus everything burned.
///
/// Overeating on one day does not cancel another day's deficit, and exercise
/// always counts in full.
pub fn day_deficit(day: &DailyCalorieData, goal: &CalorieGoal) -> f64 {
    (goal.maintenance_calories - day.total_calories).max(0.0) + day.total_calories_burned
}

pub fn total_deficit(days: &[DailyCalorieData], goal: &CalorieGoal) -> f64 {
    days.iter().map(|day| day_deficit(day, goal)).sum()
}

/// Calories still to go, clamped at zero once the goal is met.
pub fn remaining_to_goal(goal: &CalorieGoal, achieved: f64) -> f64 {
    (goal.total_calories_to_lose - achieved).max(0.0)
}

pub fn deficit_progress(days: &[DailyCalorieData], goal: &CalorieGoal) -> DeficitProgress {
    let achieved = total_deficit(days, goal);
    let percent_complete = if goal.total_calories_to_lose > 0.0 {
        (achieved / goal.total_calories_to_lose * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    DeficitProgress {
        achieved,
        remaining: remaining_to_goal(goal, achieved),
        total_to_lose: goal.total_calories_to_lose,
        percent_complete,
        days_tracked: days.len(),
        estimated_kg_lost: achieved / KCAL_PER_KG,
    }
}
