//! Rate history: valuation snapshots ordered most recent first.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::comparison::{compare_with_previous, TrendIndicator};
use super::savings_model::{AssetKind, RateEntry};

/// Ordered snapshot store. Index 0 is the newest entry.
///
/// Serializes as a plain JSON array so stored histories keep their shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateHistory {
    entries: Vec<RateEntry>,
}

/// An entry together with its position in the store and its trend versus
/// the next-older entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Index in the full store, valid for `delete_at`.
    pub index: usize,
    pub entry: RateEntry,
    pub trend: Option<TrendIndicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub label: String,
    pub items: Vec<HistoryItem>,
}

/// One asset's holding at one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub index: usize,
    pub entry_id: String,
    pub timestamp: DateTime<Utc>,
    pub asset: AssetKind,
    pub quantity: Decimal,
    pub trend: Option<TrendIndicator>,
}

impl RateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<RateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RateEntry> {
        self.entries.get(index)
    }

    /// Inserts at the head. Identical snapshots are kept; re-checking the same
    /// rate is a legitimate history event.
    pub fn append(&mut self, entry: RateEntry) {
        self.entries.insert(0, entry);
    }

    /// Removes exactly the entry at `index`. Out of range is a no-op.
    pub fn delete_at(&mut self, index: usize) -> Option<RateEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Empties the store, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// The `n` most recent entries.
    pub fn recent(&self, n: usize) -> &[RateEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Every entry with its trend versus the next-older one.
    pub fn with_trends(&self) -> Vec<HistoryItem> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.item_at(index, entry))
            .collect()
    }

    /// The `n` most recent entries with trends. The oldest shown entry still
    /// compares against its predecessor outside the window.
    pub fn recent_with_trends(&self, n: usize) -> Vec<HistoryItem> {
        self.entries
            .iter()
            .take(n)
            .enumerate()
            .map(|(index, entry)| self.item_at(index, entry))
            .collect()
    }

    /// Groups entries by calendar month of their timestamp, newest month first.
    /// Items keep their original store index.
    pub fn group_by_month(&self) -> Vec<MonthGroup> {
        let mut groups: BTreeMap<(i32, u32), Vec<HistoryItem>> = BTreeMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let key = (entry.timestamp.year(), entry.timestamp.month());
            groups
                .entry(key)
                .or_default()
                .push(self.item_at(index, entry));
        }

        groups
            .into_iter()
            .rev()
            .map(|((year, month), items)| MonthGroup {
                year,
                month,
                label: format!("{:04}-{:02}", year, month),
                items,
            })
            .collect()
    }

    /// Holding quantity of one asset across all snapshots, newest first.
    pub fn asset_timeline(&self, asset: AssetKind) -> Vec<TimelinePoint> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let previous = self.entries.get(index + 1).map(|p| p.quantity(asset));
                let quantity = entry.quantity(asset);
                TimelinePoint {
                    index,
                    entry_id: entry.id.clone(),
                    timestamp: entry.timestamp,
                    asset,
                    quantity,
                    trend: compare_with_previous(quantity, previous).map(|t| t.indicator()),
                }
            })
            .collect()
    }

    fn item_at(&self, index: usize, entry: &RateEntry) -> HistoryItem {
        let previous = self.entries.get(index + 1).map(|p| p.sum);
        HistoryItem {
            index,
            entry: entry.clone(),
            trend: compare_with_previous(entry.sum, previous).map(|t| t.indicator()),
        }
    }
}
