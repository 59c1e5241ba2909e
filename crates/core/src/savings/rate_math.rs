//! Gold purity conversion and multi-asset valuation.
//!
//! Everything here is pure. Non-positive rates are not rejected; callers treat
//! zero as "not set".

use rust_decimal::Decimal;

use super::savings_model::{AssetRates, GoldRates, RateInput, SavingsData};
use crate::constants::{GOLD_21K_TO_18K_RATIO, GOLD_21K_TO_24K_RATIO};

/// Derives 18K and 24K prices from a 21K price. Results that do not fit a
/// `Decimal` saturate at `Decimal::MAX` / `Decimal::MIN`.
pub fn convert_gold_rate(rate21k: Decimal) -> GoldRates {
    GoldRates {
        rate18k: saturating_div(rate21k, GOLD_21K_TO_18K_RATIO),
        rate24k: saturating_div(rate21k, GOLD_21K_TO_24K_RATIO),
    }
}

fn saturating_div(value: Decimal, ratio: Decimal) -> Decimal {
    value.checked_div(ratio).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Turns entered rates into a full rate set. Explicit 18K/24K prices win;
/// missing ones are derived from the 21K price.
pub fn resolve_rates(input: &RateInput) -> AssetRates {
    let derived = convert_gold_rate(input.gold21_rate);
    AssetRates {
        usd_rate: input.usd_rate,
        gold21_rate: input.gold21_rate,
        gold18_rate: if input.gold18_rate.is_zero() {
            derived.rate18k
        } else {
            input.gold18_rate
        },
        gold24_rate: if input.gold24_rate.is_zero() {
            derived.rate24k
        } else {
            input.gold24_rate
        },
    }
}

/// Total value in EGP: every rate-bearing amount times its rate, plus EGP as-is.
pub fn compute_total_value(holdings: &SavingsData, rates: &AssetRates) -> Decimal {
    [
        holdings.usd_amount.saturating_mul(rates.usd_rate),
        holdings.egp_amount,
        holdings.gold18_amount.saturating_mul(rates.gold18_rate),
        holdings.gold21_amount.saturating_mul(rates.gold21_rate),
        holdings.gold24_amount.saturating_mul(rates.gold24_rate),
    ]
    .into_iter()
    .fold(Decimal::ZERO, |acc, part| acc.saturating_add(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_convert_gold_rate() {
        let rates = convert_gold_rate(dec!(4000));
        assert_close(rates.rate24k, dec!(4571.43), dec!(0.01));
        assert_close(rates.rate18k, dec!(3428.47), dec!(0.01));
    }

    #[test]
    fn test_convert_gold_rate_zero_and_negative() {
        let zero = convert_gold_rate(Decimal::ZERO);
        assert!(zero.rate18k.is_zero());
        assert!(zero.rate24k.is_zero());

        let negative = convert_gold_rate(dec!(-875));
        assert_eq!(negative.rate24k, dec!(-1000));
        assert!(negative.rate18k.is_sign_negative());
    }

    #[test]
    fn test_convert_gold_rate_saturates_on_overflow() {
        let rates = convert_gold_rate(Decimal::MAX);
        assert_eq!(rates.rate24k, Decimal::MAX);
        assert!(rates.rate18k > dec!(0));

        let rates = convert_gold_rate(Decimal::MIN);
        assert_eq!(rates.rate24k, Decimal::MIN);

        let parsed: Decimal = "79228162514264337593543950335".parse().unwrap();
        let resolved = resolve_rates(&RateInput {
            gold21_rate: parsed,
            ..Default::default()
        });
        assert_eq!(resolved.gold24_rate, Decimal::MAX);
    }

    #[test]
    fn test_resolve_rates_prefers_explicit_prices() {
        let input = RateInput {
            usd_rate: dec!(50),
            gold21_rate: dec!(4000),
            gold18_rate: dec!(3500),
            gold24_rate: Decimal::ZERO,
        };
        let rates = resolve_rates(&input);
        assert_eq!(rates.gold18_rate, dec!(3500));
        assert_eq!(rates.gold24_rate, dec!(4000) / dec!(0.875));
        assert_eq!(rates.usd_rate, dec!(50));
    }

    #[test]
    fn test_resolve_rates_empty_input() {
        assert!(resolve_rates(&RateInput::default()).is_empty());
    }

    #[test]
    fn test_compute_total_value() {
        let holdings = SavingsData {
            usd_amount: dec!(100),
            egp_amount: dec!(2500),
            gold18_amount: dec!(2),
            gold21_amount: dec!(10),
            gold24_amount: dec!(1),
        };
        let rates = AssetRates {
            usd_rate: dec!(50),
            gold18_rate: dec!(3000),
            gold21_rate: dec!(4000),
            gold24_rate: dec!(4500),
        };
        // 5000 + 2500 + 6000 + 40000 + 4500
        assert_eq!(compute_total_value(&holdings, &rates), dec!(58000));
    }

    #[test]
    fn test_end_to_end_valuation() {
        let holdings = SavingsData {
            usd_amount: dec!(100),
            gold21_amount: dec!(10),
            ..Default::default()
        };
        let rates = resolve_rates(&RateInput {
            usd_rate: dec!(50),
            gold21_rate: dec!(4000),
            ..Default::default()
        });
        assert_close(rates.gold24_rate, dec!(4571.43), dec!(0.01));
        assert_close(rates.gold18_rate, dec!(3428.47), dec!(0.01));
        assert_eq!(compute_total_value(&holdings, &rates), dec!(45000));
    }
}
