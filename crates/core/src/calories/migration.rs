//! Versioned loading of stored calorie days.
//!
//! Version 1 records predate exercise tracking: they may lack
//! `exerciseEntries` and `totalCaloriesBurned`, store ids as numbers and
//! omit per-entry dates. Version 2 is the current [`DailyCalorieData`] shape.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::calories_model::{DailyCalorieData, ExerciseEntry, FoodEntry};
use crate::errors::{Result, ValidationError};
use crate::utils::number_utils::{lenient_f64, lenient_optional_f64, string_or_number};

pub const DAILY_CALORIE_SCHEMA_VERSION: u32 = 2;

const LEGACY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFoodEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    calories: f64,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyExerciseEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    calories_burned: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    duration_minutes: f64,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDailyCalorieData {
    date: NaiveDate,
    #[serde(default)]
    food_entries: Vec<LegacyFoodEntry>,
    #[serde(default)]
    exercise_entries: Vec<LegacyExerciseEntry>,
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    calorie_limit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    remaining_calories: Option<f64>,
}

/// Reads the `schemaVersion` field, treating an absent one as version 1.
pub fn schema_version_of(value: &Value) -> u32 {
    value
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(LEGACY_SCHEMA_VERSION)
}

/// Parses a stored day of any known version into the current shape.
pub fn migrate_daily_calorie_data(value: Value) -> Result<DailyCalorieData> {
    match schema_version_of(&value) {
        DAILY_CALORIE_SCHEMA_VERSION => Ok(serde_json::from_value(value)?),
        LEGACY_SCHEMA_VERSION => {
            let legacy: LegacyDailyCalorieData = serde_json::from_value(value)?;
            warn!(
                "Migrating legacy calorie day {} to schema v{}",
                legacy.date, DAILY_CALORIE_SCHEMA_VERSION
            );
            Ok(upgrade_v1(legacy))
        }
        found => Err(ValidationError::UnsupportedSchemaVersion {
            found,
            latest: DAILY_CALORIE_SCHEMA_VERSION,
        }
        .into()),
    }
}

fn upgrade_v1(legacy: LegacyDailyCalorieData) -> DailyCalorieData {
    let date = legacy.date;
    let day_start = date.and_time(NaiveTime::MIN).and_utc();

    let food_entries: Vec<FoodEntry> = legacy
        .food_entries
        .into_iter()
        .map(|e| FoodEntry {
            id: e.id,
            name: e.name,
            calories: e.calories,
            timestamp: e.timestamp.unwrap_or(day_start),
            date,
        })
        .collect();
    let exercise_entries: Vec<ExerciseEntry> = legacy
        .exercise_entries
        .into_iter()
        .map(|e| ExerciseEntry {
            id: e.id,
            name: e.name,
            calories_burned: e.calories_burned,
            duration_minutes: e.duration_minutes,
            timestamp: e.timestamp.unwrap_or(day_start),
            date,
        })
        .collect();

    // Totals are rebuilt from the entries so the aggregate invariants hold
    // even when the stored totals drifted.
    let total_calories = food_entries.iter().fold(0.0, |total, e| total + e.calories);
    let total_calories_burned = exercise_entries
        .iter()
        .fold(0.0, |total, e| total + e.calories_burned);
    let calorie_limit = legacy
        .calorie_limit
        .or_else(|| legacy.remaining_calories.map(|r| r + total_calories))
        .unwrap_or(0.0);

    DailyCalorieData {
        schema_version: DAILY_CALORIE_SCHEMA_VERSION,
        date,
        food_entries,
        exercise_entries,
        total_calories,
        total_calories_burned,
        remaining_calories: calorie_limit - total_calories,
        calorie_limit,
    }
}
