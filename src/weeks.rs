//! Grouping of per-title nouns into Monday-to-Sunday weeks.

use crate::models::WeekRange;
use chrono::NaiveDate;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulates noun occurrences per week.
///
/// A lemma seen in three titles of the same week is stored three times:
/// deduplication only happens within a single title. Each title contributes
/// its lemmas sorted, appended after everything already in the bucket.
#[derive(Debug, Default)]
pub struct WeekAggregator {
    buckets: BTreeMap<WeekRange, Vec<String>>,
}

impl WeekAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the nouns of one title published on `date`.
    pub fn add<I>(&mut self, date: NaiveDate, nouns: I)
    where
        I: IntoIterator<Item = String>,
    {
        let week = WeekRange::containing(date);
        debug_assert!(week.contains(date));
        let bucket = self.buckets.entry(week).or_default();
        let before = bucket.len();
        bucket.extend(nouns.into_iter().sorted());
        debug!(%week, added = bucket.len() - before, "Accumulated nouns");
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The accumulated buckets, in chronological order.
    pub fn into_buckets(self) -> BTreeMap<WeekRange, Vec<String>> {
        self.buckets
    }
}
