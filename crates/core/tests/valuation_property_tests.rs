//! Property-based integration tests for valuation, trends and the ledgers.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vitalfolio_core::calories::{
    day_deficit, CalorieGoal, DailyCalorieData, ExerciseEntry, FoodEntry,
};
use vitalfolio_core::savings::{
    compare, compute_total_value, convert_gold_rate, snapshot_entry, AssetRates, RateHistory,
    SavingsData, Trend,
};

// =============================================================================
// Generators
// =============================================================================

/// Positive prices with up to two decimal places.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Non-negative holdings with up to three decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000, 0u32..=3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn arb_savings() -> impl Strategy<Value = SavingsData> {
    (arb_amount(), arb_amount(), arb_amount(), arb_amount(), arb_amount()).prop_map(
        |(usd, egp, g18, g21, g24)| SavingsData {
            usd_amount: usd,
            egp_amount: egp,
            gold18_amount: g18,
            gold21_amount: g21,
            gold24_amount: g24,
        },
    )
}

fn arb_rates() -> impl Strategy<Value = AssetRates> {
    (arb_rate(), arb_rate(), arb_rate(), arb_rate()).prop_map(|(usd, g18, g21, g24)| AssetRates {
        usd_rate: usd,
        gold18_rate: g18,
        gold21_rate: g21,
        gold24_rate: g24,
    })
}

/// Calorie amounts with one decimal place.
fn arb_calories(max_tenths: u32) -> impl Strategy<Value = f64> {
    (0..max_tenths).prop_map(|tenths| tenths as f64 / 10.0)
}

fn ledger_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn food(id: usize, calories: f64) -> FoodEntry {
    FoodEntry {
        id: format!("food-{}", id),
        name: "meal".to_string(),
        calories,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        date: ledger_date(),
    }
}

fn exercise(id: usize, calories: f64) -> ExerciseEntry {
    ExerciseEntry {
        id: format!("exercise-{}", id),
        name: "workout".to_string(),
        calories_burned: calories,
        duration_minutes: 20.0,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap(),
        date: ledger_date(),
    }
}

fn goal(maintenance: u32) -> CalorieGoal {
    CalorieGoal {
        maintenance_calories: maintenance as f64,
        daily_calorie_limit: maintenance as f64,
        target_weight_loss: 0.0,
        total_calories_to_lose: 0.0,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        age: None,
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

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn gold_conversion_round_trips(rate in arb_rate()) {
        let converted = convert_gold_rate(rate);
        let tolerance = dec!(0.000001);
        prop_assert!((converted.rate24k * dec!(0.875) - rate).abs() <= tolerance);
        prop_assert!((converted.rate18k * dec!(1.1667) - rate).abs() <= tolerance);
    }

    #[test]
    fn total_value_is_five_term_sum(holdings in arb_savings(), rates in arb_rates()) {
        let expected = holdings.usd_amount * rates.usd_rate
            + holdings.egp_amount
            + holdings.gold18_amount * rates.gold18_rate
            + holdings.gold21_amount * rates.gold21_rate
            + holdings.gold24_amount * rates.gold24_rate;
        prop_assert_eq!(compute_total_value(&holdings, &rates), expected);
    }

    #[test]
    fn compare_against_zero_has_no_trend(current in arb_amount()) {
        prop_assert_eq!(compare(current, Decimal::ZERO), None);
    }

    #[test]
    fn compare_is_antisymmetric(a in arb_rate(), b in arb_rate()) {
        match (compare(a, b), compare(b, a)) {
            (Some(Trend::Increase), Some(Trend::Decrease))
            | (Some(Trend::Decrease), Some(Trend::Increase))
            | (Some(Trend::NoChange), Some(Trend::NoChange)) => {}
            other => prop_assert!(false, "unexpected pair {:?}", other),
        }
    }

    #[test]
    fn history_append_then_recent(holdings in arb_savings(), rates in arb_rates(), prior in 0usize..6) {
        let mut history = RateHistory::new();
        for _ in 0..prior {
            history.append(snapshot_entry(&SavingsData::default(), &rates));
        }
        let entry = snapshot_entry(&holdings, &rates);
        history.append(entry.clone());
        prop_assert_eq!(history.recent(1), &[entry][..]);
        prop_assert_eq!(history.len(), prior + 1);
    }

    #[test]
    fn add_then_delete_food_restores_day(
        existing in proptest::collection::vec(arb_calories(30_000), 0..8),
        extra in arb_calories(30_000),
        limit in 0u32..4000,
    ) {
        let mut day = DailyCalorieData::new(ledger_date(), limit as f64);
        for (i, calories) in existing.iter().enumerate() {
            day.add_food(food(i, *calories));
        }
        let before = day.clone();

        day.add_food(food(existing.len(), extra));
        let removed_id = format!("food-{}", existing.len());
        prop_assert!(day.delete_food(&removed_id).is_some());
        prop_assert_eq!(day, before);
    }

    #[test]
    fn deleting_every_food_empties_the_day(
        entries in proptest::collection::vec(arb_calories(30_000), 1..8),
        limit in 0u32..4000,
    ) {
        let empty = DailyCalorieData::new(ledger_date(), limit as f64);
        let mut day = empty.clone();
        for (i, calories) in entries.iter().enumerate() {
            day.add_food(food(i, *calories));
        }
        for i in (0..entries.len()).rev() {
            let id = format!("food-{}", i);
            prop_assert!(day.delete_food(&id).is_some());
        }
        prop_assert_eq!(day, empty);
    }

    #[test]
    fn exercise_never_changes_remaining(
        eaten in arb_calories(40_000),
        burned in arb_calories(20_000),
        limit in 0u32..4000,
    ) {
        let mut day = DailyCalorieData::new(ledger_date(), limit as f64);
        day.add_food(food(0, eaten));
        let remaining = day.remaining_calories;
        day.add_exercise(exercise(0, burned));
        prop_assert_eq!(day.remaining_calories, remaining);
    }

    #[test]
    fn day_deficit_is_floored_food_plus_exercise(
        eaten in arb_calories(50_000),
        burned in arb_calories(20_000),
        maintenance in 1000u32..3500,
    ) {
        let mut day = DailyCalorieData::new(ledger_date(), 0.0);
        day.add_food(food(0, eaten));
        day.add_exercise(exercise(0, burned));
        let deficit = day_deficit(&day, &goal(maintenance));
        prop_assert!(deficit >= burned);
        prop_assert_eq!(deficit, (maintenance as f64 - eaten).max(0.0) + burned);
    }
}
