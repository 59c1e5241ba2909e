use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::savings::{compare_with_previous, TrendIndicator};
use crate::utils::number_utils::{lenient_decimal, string_or_number};

pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    #[default]
    Personal,
    #[serde(alias = "home", alias = "household")]
    House,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Personal => "personal",
            ExpenseKind::House => "house",
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub kind: ExpenseKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseEntry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub kind: ExpenseKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// All expenses recorded for one `YYYY-MM` month, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpending {
    pub month: String,
    #[serde(default)]
    pub entries: Vec<ExpenseEntry>,
}

impl MonthlySpending {
    pub fn new(month: impl Into<String>) -> Self {
        MonthlySpending {
            month: month.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_expense(&mut self, entry: ExpenseEntry) {
        self.entries.insert(0, entry);
    }

    /// Removes an expense by id. Unknown ids are ignored.
    pub fn delete_expense(&mut self, id: &str) -> Option<ExpenseEntry> {
        let position = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub month: String,
    pub total: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
    pub by_kind: BTreeMap<String, Decimal>,
    pub entry_count: usize,
    pub previous_total: Option<Decimal>,
    /// Direction versus the previous month, absent when that month is empty.
    pub trend: Option<TrendIndicator>,
}

/// Rolls a month's entries up by category and kind.
pub fn summarize(
    month: &str,
    entries: &[ExpenseEntry],
    previous_total: Option<Decimal>,
) -> SpendingSummary {
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut by_kind: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;

    for entry in entries {
        let category = if entry.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            entry.category.trim().to_lowercase()
        };
        *by_category.entry(category).or_insert(Decimal::ZERO) += entry.amount;
        *by_kind
            .entry(entry.kind.as_str().to_string())
            .or_insert(Decimal::ZERO) += entry.amount;
        total += entry.amount;
    }

    SpendingSummary {
        month: month.to_string(),
        total,
        by_category,
        by_kind,
        entry_count: entries.len(),
        previous_total,
        trend: compare_with_previous(total, previous_total).map(|t| t.indicator()),
    }
}
