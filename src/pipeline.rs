//! The analysis pipeline: raw records in, ranked weeks out.
//!
//! ```text
//! RawRecord ──► DateNormalizer ──┐
//!          └──► NounExtractor ───┴──► WeekAggregator ──► FrequencyRanker ──► WeeklyReport
//! ```
//!
//! Records with an unparseable date are skipped with a warning; one bad
//! timestamp must not discard a whole run.

use crate::dates::DateNormalizer;
use crate::models::{RankedWeek, RawRecord, WeeklyReport};
use crate::morph::MorphAnalyzer;
use crate::nouns::NounExtractor;
use crate::ranking::FrequencyRanker;
use crate::utils::truncate_for_log;
use crate::weeks::WeekAggregator;
use tracing::{debug, info, instrument, warn};

/// Borrowed collaborators for a single run.
#[derive(Debug)]
pub struct Pipeline<'a, A> {
    normalizer: &'a DateNormalizer,
    extractor: &'a NounExtractor<'a, A>,
    ranker: FrequencyRanker,
}

impl<'a, A: MorphAnalyzer> Pipeline<'a, A> {
    pub fn new(
        normalizer: &'a DateNormalizer,
        extractor: &'a NounExtractor<'a, A>,
        top: usize,
    ) -> Self {
        Self {
            normalizer,
            extractor,
            ranker: FrequencyRanker::new(top),
        }
    }

    /// Normalize, extract, bucket and rank every record.
    ///
    /// Weeks in the report are in chronological order. An empty input gives
    /// an empty report.
    #[instrument(level = "info", skip_all, fields(top = self.ranker.top()))]
    pub fn run<I>(&self, records: I) -> WeeklyReport
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut aggregator = WeekAggregator::new();
        let mut records_seen = 0usize;
        let mut records_skipped = 0usize;

        for record in records {
            records_seen += 1;
            let date = match self.normalizer.normalize(&record.date) {
                Ok(date) => date,
                Err(e) => {
                    records_skipped += 1;
                    warn!(
                        raw_date = %record.date,
                        title = %truncate_for_log(&record.title, 80),
                        error = %e,
                        "Skipping record with unparseable date"
                    );
                    continue;
                }
            };
            let nouns = self.extractor.extract(&record.title);
            debug!(%date, nouns = nouns.len(), "Processed record");
            aggregator.add(date, nouns);
        }

        if aggregator.is_empty() {
            info!(records_seen, "No dated records to rank");
        } else {
            debug!(weeks = aggregator.len(), "Ranking weekly buckets");
        }

        let weeks: Vec<RankedWeek> = aggregator
            .into_buckets()
            .into_iter()
            .map(|(week, lemmas)| RankedWeek {
                week,
                nouns: self.ranker.rank(&lemmas),
            })
            .collect();

        info!(
            records_seen,
            records_skipped,
            weeks = weeks.len(),
            "Ranked weekly nouns"
        );
        WeeklyReport {
            weeks,
            records_seen,
            records_skipped,
        }
    }
}
