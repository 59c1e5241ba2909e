//! Calories module - goal, per-day food/exercise ledger and deficit progress.

pub mod calculator;
mod calories_model;
mod calories_service;
mod calories_traits;
pub mod ledger;
pub mod migration;

pub use calculator::{calculate_bmr, calculate_goal, calculate_tdee};
pub use calories_model::*;
pub use calories_service::CalorieService;
pub use calories_traits::{CalorieRepositoryTrait, CalorieServiceTrait, DayUpdate};
pub use ledger::{day_deficit, deficit_progress, remaining_to_goal, total_deficit};
pub use migration::{migrate_daily_calorie_data, DAILY_CALORIE_SCHEMA_VERSION};

#[cfg(test)]
mod calories_service_tests;
