//! BMR / TDEE based goal calculator.

use chrono::Utc;

use super::calories_model::{CalorieGoal, CalorieProfile, Gender, WeightGoal};
use crate::constants::{KCAL_PER_KG, MIN_DAILY_CALORIES_FEMALE, MIN_DAILY_CALORIES_MALE};
use crate::errors::{Result, ValidationError};

const MAX_BODY_FAT_PERCENT: f64 = 70.0;

/// Basal metabolic rate in kcal/day.
///
/// Katch-McArdle when body fat is known, Mifflin-St Jeor otherwise.
pub fn calculate_bmr(profile: &CalorieProfile) -> f64 {
    match profile.body_fat {
        Some(body_fat) => {
            let lean_mass = profile.weight * (1.0 - body_fat / 100.0);
            370.0 + 21.6 * lean_mass
        }
        None => {
            let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * profile.age;
            match profile.gender {
                Gender::Male => base + 5.0,
                Gender::Female => base - 161.0,
            }
        }
    }
}

/// Total daily energy expenditure (maintenance calories).
pub fn calculate_tdee(profile: &CalorieProfile) -> f64 {
    calculate_bmr(profile) * profile.activity_level.multiplier()
}

fn minimum_daily_calories(gender: Gender) -> f64 {
    match gender {
        Gender::Male => MIN_DAILY_CALORIES_MALE,
        Gender::Female => MIN_DAILY_CALORIES_FEMALE,
    }
}

fn validate_profile(profile: &CalorieProfile) -> Result<()> {
    let positive = [
        ("age", profile.age),
        ("weight", profile.weight),
        ("height", profile.height),
    ];
    for (field, value) in positive {
        if value <= 0.0 {
            return Err(ValidationError::InvalidInput(format!(
                "{} must be greater than zero",
                field
            ))
            .into());
        }
    }

    if let Some(body_fat) = profile.body_fat {
        if !(0.0..=MAX_BODY_FAT_PERCENT).contains(&body_fat) {
            return Err(ValidationError::InvalidInput(format!(
                "bodyFat must be between 0 and {}",
                MAX_BODY_FAT_PERCENT
            ))
            .into());
        }
    }

    if profile.goal != WeightGoal::Maintain {
        if profile.target_weeks <= 0.0 {
            return Err(ValidationError::InvalidInput(
                "targetWeeks must be greater than zero".to_string(),
            )
            .into());
        }
        if profile.target_weight_change < 0.0 {
            return Err(ValidationError::InvalidInput(
                "targetWeightChange cannot be negative".to_string(),
            )
            .into());
        }
    }

    Ok(())
}

/// Derives a full goal from a body profile.
pub fn calculate_goal(profile: &CalorieProfile) -> Result<CalorieGoal> {
    validate_profile(profile)?;

    let maintenance = calculate_tdee(profile);
    let weekly_change = match profile.goal {
        WeightGoal::Maintain => 0.0,
        _ => profile.target_weight_change / profile.target_weeks,
    };
    let daily_adjustment = weekly_change * KCAL_PER_KG / 7.0;

    let unfloored = match profile.goal {
        WeightGoal::Lose => maintenance - daily_adjustment,
        WeightGoal::Maintain => maintenance,
        WeightGoal::Gain => maintenance + daily_adjustment,
    };
    let daily_limit = unfloored.max(minimum_daily_calories(profile.gender));

    let total_calories_to_lose = match profile.goal {
        WeightGoal::Lose => profile.target_weight_change * KCAL_PER_KG,
        _ => 0.0,
    };

    Ok(CalorieGoal {
        maintenance_calories: maintenance.round(),
        daily_calorie_limit: daily_limit.round(),
        target_weight_loss: match profile.goal {
            WeightGoal::Lose => weekly_change,
            _ => 0.0,
        },
        total_calories_to_lose: total_calories_to_lose.round(),
        created_at: Utc::now(),
        age: Some(profile.age),
        weight: Some(profile.weight),
        height: Some(profile.height),
        gender: Some(profile.gender),
        body_fat: profile.body_fat,
        activity_level: Some(profile.activity_level),
        goal: Some(profile.goal),
        target_weight_change: Some(profile.target_weight_change),
        target_weeks: Some(profile.target_weeks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calories::calories_model::ActivityLevel;
    use crate::errors::Error;

    fn profile() -> CalorieProfile {
        CalorieProfile {
            age: 30.0,
            weight: 80.0,
            height: 180.0,
            gender: Gender::Male,
            body_fat: None,
            activity_level: ActivityLevel::Sedentary,
            goal: WeightGoal::Lose,
            target_weight_change: 5.0,
            target_weeks: 10.0,
        }
    }

    #[test]
    fn test_mifflin_st_jeor() {
        // 800 + 1125 - 150 + 5
        assert_eq!(calculate_bmr(&profile()), 1780.0);

        let female = CalorieProfile {
            gender: Gender::Female,
            ..profile()
        };
        assert_eq!(calculate_bmr(&female), 1614.0);
    }

    #[test]
    fn test_katch_mcardle_with_body_fat() {
        let lean = CalorieProfile {
            body_fat: Some(25.0),
            ..profile()
        };
        // lean mass 60 kg
        assert!((calculate_bmr(&lean) - 1666.0).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_uses_activity_multiplier() {
        let active = CalorieProfile {
            activity_level: ActivityLevel::Moderate,
            ..profile()
        };
        assert!((calculate_tdee(&active) - 1780.0 * 1.55).abs() < 1e-9);
    }

    #[test]
    fn test_lose_goal() {
        let goal = calculate_goal(&profile()).unwrap();
        // 1780 * 1.2 = 2136, minus 0.5 kg/week = 550 kcal/day
        assert_eq!(goal.maintenance_calories, 2136.0);
        assert_eq!(goal.daily_calorie_limit, 1586.0);
        assert_eq!(goal.target_weight_loss, 0.5);
        assert_eq!(goal.total_calories_to_lose, 38500.0);
        assert_eq!(goal.goal, Some(WeightGoal::Lose));
    }

    #[test]
    fn test_limit_floored_by_gender() {
        let aggressive = CalorieProfile {
            target_weight_change: 10.0,
            target_weeks: 5.0,
            ..profile()
        };
        assert_eq!(
            calculate_goal(&aggressive).unwrap().daily_calorie_limit,
            MIN_DAILY_CALORIES_MALE
        );

        let female = CalorieProfile {
            gender: Gender::Female,
            ..aggressive
        };
        assert_eq!(
            calculate_goal(&female).unwrap().daily_calorie_limit,
            MIN_DAILY_CALORIES_FEMALE
        );
    }

    #[test]
    fn test_maintain_and_gain() {
        let maintain = CalorieProfile {
            goal: WeightGoal::Maintain,
            target_weeks: 0.0,
            ..profile()
        };
        let goal = calculate_goal(&maintain).unwrap();
        assert_eq!(goal.daily_calorie_limit, goal.maintenance_calories);
        assert_eq!(goal.total_calories_to_lose, 0.0);

        let gain = CalorieProfile {
            goal: WeightGoal::Gain,
            ..profile()
        };
        let goal = calculate_goal(&gain).unwrap();
        assert_eq!(goal.daily_calorie_limit, 2686.0);
        assert_eq!(goal.total_calories_to_lose, 0.0);
    }

    #[test]
    fn test_invalid_profiles() {
        let cases = [
            CalorieProfile {
                weight: 0.0,
                ..profile()
            },
            CalorieProfile {
                age: -1.0,
                ..profile()
            },
            CalorieProfile {
                target_weeks: 0.0,
                ..profile()
            },
            CalorieProfile {
                body_fat: Some(85.0),
                ..profile()
            },
        ];
        for case in cases {
            assert!(matches!(
                calculate_goal(&case),
                Err(Error::Validation(ValidationError::InvalidInput(_)))
            ));
        }
    }
}
