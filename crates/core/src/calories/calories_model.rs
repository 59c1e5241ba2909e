//! Calorie tracking domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::migration::DAILY_CALORIE_SCHEMA_VERSION;
use crate::utils::number_utils::{lenient_f64, lenient_optional_f64, string_or_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "Male", alias = "m")]
    Male,
    #[serde(alias = "Female", alias = "f")]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    #[serde(alias = "lightlyActive", alias = "lightly_active")]
    Light,
    #[serde(alias = "moderatelyActive", alias = "moderately_active")]
    Moderate,
    Active,
    #[serde(alias = "very_active", alias = "extraActive")]
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to estimate daily expenditure.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    #[serde(alias = "loss")]
    Lose,
    Maintain,
    #[serde(alias = "gain_weight")]
    Gain,
}

/// The user's calorie goal. At most one per user.
///
/// The optional profile fields are present when the goal came out of the
/// BMR/TDEE calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieGoal {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub maintenance_calories: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_calorie_limit: f64,
    /// Planned loss in kg per week.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_weight_loss: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_calories_to_lose: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<WeightGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub target_weight_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_f64")]
    pub target_weeks: Option<f64>,
}

/// Manually entered goal figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieGoalInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub maintenance_calories: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_calorie_limit: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_weight_loss: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_calories_to_lose: f64,
}

/// Body profile fed to the goal calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieProfile {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub age: f64,
    /// kg
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    /// cm
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: f64,
    pub gender: Gender,
    /// Percent, e.g. `22.5`.
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    pub body_fat: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    /// kg to lose or gain over `target_weeks`.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_weight_change: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_weeks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: f64,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories_burned: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_minutes: f64,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodEntry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExerciseEntry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories_burned: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_minutes: f64,
}

/// One calendar day of intake and exercise.
///
/// `total_calories` and `total_calories_burned` always equal the sums of their
/// entries; `remaining_calories` is `calorie_limit - total_calories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCalorieData {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    pub date: NaiveDate,
    pub food_entries: Vec<FoodEntry>,
    pub exercise_entries: Vec<ExerciseEntry>,
    pub total_calories: f64,
    pub total_calories_burned: f64,
    pub remaining_calories: f64,
    pub calorie_limit: f64,
}

fn current_schema_version() -> u32 {
    DAILY_CALORIE_SCHEMA_VERSION
}

/// Cumulative progress toward the calorie goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeficitProgress {
    pub achieved: f64,
    pub remaining: f64,
    pub total_to_lose: f64,
    /// 0 to 100.
    pub percent_complete: f64,
    pub days_tracked: usize,
    pub estimated_kg_lost: f64,
}
