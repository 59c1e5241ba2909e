//! Lenient numeric deserialization.
//!
//! Form fields arrive as numbers, numeric strings, empty strings or `null`.
//! Anything that is not a usable number reads as zero, the "not set" value
//! used throughout the domain.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    fn into_f64(self) -> f64 {
        let value = match self {
            LooseNumber::Number(n) => n,
            LooseNumber::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            LooseNumber::Other(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    fn into_decimal(self) -> Decimal {
        match self {
            LooseNumber::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<Decimal>()
                    .ok()
                    .or_else(|| Decimal::from_scientific(trimmed).ok())
                    .unwrap_or(Decimal::ZERO)
            }
            other => Decimal::from_f64(other.into_f64()).unwrap_or(Decimal::ZERO),
        }
    }
}

/// Deserializes a `Decimal`, reading missing or malformed input as zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LooseNumber::deserialize(deserializer)?.into_decimal())
}

/// Deserializes an `f64`, reading missing or malformed input as zero.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LooseNumber::deserialize(deserializer)?.into_f64())
}

/// Like [`lenient_f64`] but keeps "not provided" distinct from zero.
pub fn lenient_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Other(_) => None,
        LooseNumber::Text(s) if s.trim().is_empty() => None,
        other => Some(other.into_f64()),
    })
}

/// Deserializes an identifier stored either as a string or as a bare number
/// (older records used millisecond timestamps as ids).
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
