//! Savings domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::utils::number_utils::lenient_decimal;

/// Asset classes tracked by the savings tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Usd,
    Egp,
    Gold18,
    Gold21,
    Gold24,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Usd,
        AssetKind::Egp,
        AssetKind::Gold18,
        AssetKind::Gold21,
        AssetKind::Gold24,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Usd => "usd",
            AssetKind::Egp => "egp",
            AssetKind::Gold18 => "gold18",
            AssetKind::Gold21 => "gold21",
            AssetKind::Gold24 => "gold24",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("Unknown asset '{}'", s)).into()
            })
    }
}

/// The user's current holdings. Amounts are units of each asset
/// (dollars, pounds, grams of gold).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsData {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub egp_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold18_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold21_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold24_amount: Decimal,
}

impl SavingsData {
    pub fn quantity(&self, asset: AssetKind) -> Decimal {
        match asset {
            AssetKind::Usd => self.usd_amount,
            AssetKind::Egp => self.egp_amount,
            AssetKind::Gold18 => self.gold18_amount,
            AssetKind::Gold21 => self.gold21_amount,
            AssetKind::Gold24 => self.gold24_amount,
        }
    }
}

/// Rates as typed by the user. A zero 18K or 24K rate means "derive it from 21K".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInput {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold21_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold18_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold24_rate: Decimal,
}

/// Unit prices in EGP. EGP itself has an implicit rate of 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRates {
    pub usd_rate: Decimal,
    pub gold18_rate: Decimal,
    pub gold21_rate: Decimal,
    pub gold24_rate: Decimal,
}

impl AssetRates {
    /// True when no rate has been set, in which case no snapshot is taken.
    pub fn is_empty(&self) -> bool {
        self.usd_rate.is_zero()
            && self.gold18_rate.is_zero()
            && self.gold21_rate.is_zero()
            && self.gold24_rate.is_zero()
    }

    pub fn rate(&self, asset: AssetKind) -> Decimal {
        match asset {
            AssetKind::Usd => self.usd_rate,
            AssetKind::Egp => Decimal::ONE,
            AssetKind::Gold18 => self.gold18_rate,
            AssetKind::Gold21 => self.gold21_rate,
            AssetKind::Gold24 => self.gold24_rate,
        }
    }
}

/// 18K and 24K prices derived from a 21K price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldRates {
    pub rate18k: Decimal,
    pub rate24k: Decimal,
}

/// A frozen valuation snapshot: holdings and rates at one moment plus the
/// total computed from them. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold18_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold21_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold24_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub egp_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold18_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold21_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gold24_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sum: Decimal,
}

impl RateEntry {
    pub fn holdings(&self) -> SavingsData {
        SavingsData {
            usd_amount: self.usd_amount,
            egp_amount: self.egp_amount,
            gold18_amount: self.gold18_amount,
            gold21_amount: self.gold21_amount,
            gold24_amount: self.gold24_amount,
        }
    }

    pub fn rates(&self) -> AssetRates {
        AssetRates {
            usd_rate: self.usd_rate,
            gold18_rate: self.gold18_rate,
            gold21_rate: self.gold21_rate,
            gold24_rate: self.gold24_rate,
        }
    }

    pub fn quantity(&self, asset: AssetKind) -> Decimal {
        match asset {
            AssetKind::Usd => self.usd_amount,
            AssetKind::Egp => self.egp_amount,
            AssetKind::Gold18 => self.gold18_amount,
            AssetKind::Gold21 => self.gold21_amount,
            AssetKind::Gold24 => self.gold24_amount,
        }
    }
}
