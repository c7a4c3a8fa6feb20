//! Reduction of raw records into the layout engine's input shape.
//!
//! Ordering is a contract here: categories and groups come out in the order
//! they are first seen in the input, and that order drives legend entries,
//! axis labels and row-band assignment downstream.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::CountRecord;

/// A validated record, referring to categories and groups by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) category: usize,
    pub(crate) group: usize,
    pub(crate) units: u64,
}

/// Unique categories, unique groups and per-group totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Categories in first-seen order.
    pub categories: Vec<Arc<str>>,
    /// Groups in first-seen order.
    pub groups: Vec<Arc<str>>,
    /// Sum of counts per group, keyed in the same order as `groups`.
    pub totals_by_group: IndexMap<Arc<str>, u64>,
    #[serde(skip)]
    pub(crate) entries: Vec<Entry>,
}

impl Aggregation {
    /// Total units for `group`, or `None` if the group never appeared.
    #[must_use]
    pub fn total(&self, group: &str) -> Option<u64> {
        self.totals_by_group.get(group).copied()
    }

    /// Sum of all group totals (saturating).
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.totals_by_group
            .values()
            .fold(0u64, |acc, t| acc.saturating_add(*t))
    }

    /// Band index of `group`.
    #[must_use]
    pub fn group_index(&self, group: &str) -> Option<usize> {
        self.totals_by_group.get_index_of(group)
    }

    /// Legend index of `category`.
    #[must_use]
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.as_ref() == category)
    }

    /// Largest single group total (0 when there are no groups).
    #[must_use]
    pub fn max_total(&self) -> u64 {
        self.totals_by_group.values().copied().max().unwrap_or(0)
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grand_total() == 0
    }
}

/// Deduplicate categories and groups and sum counts per group.
///
/// Duplicate `(category, group)` pairs are additive. Every count is
/// validated before anything is returned.
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] if a count is negative, fractional or
/// non-finite, or if a group total overflows.
pub fn aggregate(records: &[CountRecord]) -> Result<Aggregation> {
    let mut categories: IndexSet<Arc<str>> = IndexSet::new();
    let mut totals: IndexMap<Arc<str>, u64> = IndexMap::new();
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let units = record.units()?;

        let category = match categories.get_index_of(record.category.as_str()) {
            Some(i) => i,
            None => categories.insert_full(Arc::from(record.category.as_str())).0,
        };

        let group = match totals.get_index_of(record.group.as_str()) {
            Some(i) => i,
            None => totals.insert_full(Arc::from(record.group.as_str()), 0).0,
        };

        if let Some((_, total)) = totals.get_index_mut(group) {
            *total = total.checked_add(units).ok_or_else(|| {
                Error::invalid_record(&record.category, &record.group, "group total overflows u64")
            })?;
        }

        entries.push(Entry {
            category,
            group,
            units,
        });
    }

    Ok(Aggregation {
        categories: categories.into_iter().collect(),
        groups: totals.keys().cloned().collect(),
        totals_by_group: totals,
        entries,
    })
}
