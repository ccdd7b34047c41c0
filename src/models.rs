//! Data models shared by the fetcher, the analysis pipeline and the outputs.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawRecord`]: A (date, title) pair exactly as scraped from a listing page
//! - [`WeekRange`]: A Monday-to-Sunday span of calendar dates
//! - [`RankedWeek`]: The top nouns of one week with their occurrence counts
//! - [`WeeklyReport`]: Everything a single run produces
//!
//! Calendar dates are plain [`chrono::NaiveDate`] values: no time of day,
//! no timezone, always a real Gregorian date.

use chrono::{Duration, NaiveDate, Weekday, Datelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for dates in rendered output, e.g. `09/04/2018`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// An article preview as scraped from a listing page.
///
/// The date is still in the site's locale format (`"вчера в 16:41"`,
/// `"22 декабря 2017 в 12:48"`, an RFC 3339 timestamp, ...). Records are
/// consumed by the pipeline immediately after fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// The publication date string in locale format.
    pub date: String,
    /// The article title as displayed on the listing.
    pub title: String,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
        }
    }
}

/// A Monday-through-Sunday week, both ends inclusive.
///
/// Ordering is by start date, so a `BTreeMap<WeekRange, _>` iterates weeks
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekRange {
    /// The Monday that opens the week.
    pub start: NaiveDate,
    /// The Sunday that closes the week (`start + 6 days`).
    pub end: NaiveDate,
}

impl WeekRange {
    /// The week that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        let start = date - Duration::days(offset);
        let end = start + Duration::days(6);
        debug_assert_eq!(start.weekday(), Weekday::Mon);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(DISPLAY_DATE_FORMAT),
            self.end.format(DISPLAY_DATE_FORMAT)
        )
    }
}

/// A noun lemma together with how many times it occurred in a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounCount {
    pub lemma: String,
    pub count: usize,
}

impl NounCount {
    pub fn new(lemma: impl Into<String>, count: usize) -> Self {
        Self {
            lemma: lemma.into(),
            count,
        }
    }
}

/// The ranked nouns of a single week, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWeek {
    pub week: WeekRange,
    /// At most `top` entries, ordered by descending count.
    pub nouns: Vec<NounCount>,
}

/// The result of one pipeline run.
///
/// # JSON Shape
///
/// ```json
/// {
///   "weeks": [
///     {
///       "week": { "start": "2018-04-09", "end": "2018-04-15" },
///       "nouns": [ { "lemma": "голос", "count": 1 } ]
///     }
///   ],
///   "records_seen": 2,
///   "records_skipped": 0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// One entry per distinct week observed, in chronological order.
    pub weeks: Vec<RankedWeek>,
    /// Number of raw records handed to the pipeline.
    pub records_seen: usize,
    /// Records dropped because their date could not be normalized.
    pub records_skipped: usize,
}
