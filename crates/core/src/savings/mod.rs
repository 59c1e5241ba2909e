//! Savings module - holdings, gold/currency valuation and the rate history.

pub mod comparison;
pub mod history;
pub mod rate_math;
mod savings_model;
mod savings_service;
mod savings_traits;

pub use comparison::{compare, compare_with_previous, Trend, TrendIndicator};
pub use history::{HistoryItem, MonthGroup, RateHistory, TimelinePoint};
pub use rate_math::{compute_total_value, convert_gold_rate, resolve_rates};
pub use savings_model::*;
pub use savings_service::{snapshot_entry, SavingsService};
pub use savings_traits::{HistoryUpdate, SavingsRepositoryTrait, SavingsServiceTrait};
