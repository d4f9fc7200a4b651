//! Items report read model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult};

use crate::invoice::InvoiceItem;

/// Item name -> total purchased count.
///
/// Ordered by name so iteration and serialized output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemsReport {
    counts: BTreeMap<String, u64>,
}

impl ItemsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item's count to its name bucket.
    pub fn record(&mut self, item: &InvoiceItem) -> DomainResult<()> {
        let bucket = self.counts.entry(item.name.clone()).or_insert(0);
        *bucket = bucket
            .checked_add(u64::from(item.count))
            .ok_or_else(|| DomainError::invariant(format!("item count overflow for {}", item.name)))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all buckets.
    pub fn total_count(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn into_inner(self) -> BTreeMap<String, u64> {
        self.counts
    }
}

impl FromIterator<(String, u64)> for ItemsReport {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, u64)> for ItemsReport {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect()
    }
}

impl IntoIterator for ItemsReport {
    type Item = (String, u64);
    type IntoIter = std::collections::btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl From<ItemsReport> for BTreeMap<String, u64> {
    fn from(report: ItemsReport) -> Self {
        report.counts
    }
}
