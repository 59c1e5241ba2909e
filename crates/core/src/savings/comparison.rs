//! Trend classification between a value and the value before it.

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Increase,
    Decrease,
    NoChange,
}

impl Trend {
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Increase => "increase",
            Trend::Decrease => "decrease",
            Trend::NoChange => "no-change",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Increase => "↑",
            Trend::Decrease => "↓",
            Trend::NoChange => "→",
        }
    }

    pub fn indicator(&self) -> TrendIndicator {
        TrendIndicator {
            class: *self,
            icon: self.icon(),
        }
    }
}

/// Render-ready form of a [`Trend`]: `{"class": "increase", "icon": "↑"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendIndicator {
    pub class: Trend,
    pub icon: &'static str,
}

/// Classifies `current` against `previous`.
///
/// A zero `previous` means there is nothing to compare against (including
/// "no previous entry"), so no trend is reported. Works for any scalar with
/// a zero: history sums, asset quantities, monthly spending.
pub fn compare<T>(current: T, previous: T) -> Option<Trend>
where
    T: PartialOrd + Zero,
{
    if previous.is_zero() {
        return None;
    }
    match current.partial_cmp(&previous)? {
        Ordering::Greater => Some(Trend::Increase),
        Ordering::Less => Some(Trend::Decrease),
        Ordering::Equal => Some(Trend::NoChange),
    }
}

/// [`compare`] against an optional previous value; `None` behaves like zero.
pub fn compare_with_previous<T>(current: T, previous: Option<T>) -> Option<Trend>
where
    T: PartialOrd + Zero,
{
    compare(current, previous.unwrap_or_else(T::zero))
}
