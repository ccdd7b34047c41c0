//! Normalization of Habr's locale-formatted publication dates.
//!
//! Listing pages show dates the way a Russian reader expects them:
//!
//! | Raw string | Meaning |
//! |------------|---------|
//! | `сегодня в 12:03` | today |
//! | `вчера в 16:41` | yesterday |
//! | `29 апреля в 21:14` | 29 April of the current year |
//! | `22 декабря 2017 в 12:48` | 22 December 2017 |
//!
//! Newer markup carries an RFC 3339 timestamp instead, and records that were
//! already normalized (`12/04/2018`) are accepted as-is. The time of day is
//! validated but discarded: only the calendar date matters for bucketing.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, instrument};

/// Genitive month names as printed by Habr, mapped to the English names
/// chrono's `%B` understands.
const MONTHS: [(&str, &str); 12] = [
    ("января", "January"),
    ("февраля", "February"),
    ("марта", "March"),
    ("апреля", "April"),
    ("мая", "May"),
    ("июня", "June"),
    ("июля", "July"),
    ("августа", "August"),
    ("сентября", "September"),
    ("октября", "October"),
    ("ноября", "November"),
    ("декабря", "December"),
];

const TODAY: &str = "сегодня";
const YESTERDAY: &str = "вчера";

const WITH_YEAR: &str = "%d %B %Y в %H:%M";
const WITHOUT_YEAR: &str = "%d %B в %H:%M";
const CANONICAL_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d.%m.%Y"];

/// Why a date string could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The string has the `<day> <month> ...` shape but the month word is unknown.
    #[error("unrecognized month name {0:?}")]
    UnknownMonth(String),
    /// The string matches none of the supported layouts.
    #[error("date {0:?} matches no known layout")]
    Unrecognized(String),
}

/// Turns locale date strings into calendar dates.
///
/// Relative markers resolve against `today`, which is fixed when the
/// normalizer is built so that a run crossing midnight stays consistent.
#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    today: NaiveDate,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateNormalizer {
    /// A normalizer anchored at the local current date.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// A normalizer anchored at an explicit processing date.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Normalize one raw date string.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] when the string matches no supported
    /// layout, names an unknown month, or describes an impossible date
    /// such as `31 февраля`.
    #[instrument(level = "trace", skip(self))]
    pub fn normalize(&self, raw: &str) -> Result<NaiveDate, DateParseError> {
        let raw = raw.trim();

        for format in CANONICAL_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(date);
            }
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.date_naive());
        }

        let spelled = self.spell_out(&raw.to_lowercase())?;
        debug!(%spelled, "Substituted month name");

        let mut parsed = Parsed::new();
        if parse(&mut parsed, &spelled, StrftimeItems::new(WITH_YEAR)).is_ok() {
            if let Ok(date) = parsed.to_naive_date() {
                return Ok(date);
            }
        }

        let mut parsed = Parsed::new();
        parse(&mut parsed, &spelled, StrftimeItems::new(WITHOUT_YEAR))
            .and_then(|_| parsed.set_year(self.today.year() as i64))
            .and_then(|_| parsed.to_naive_date())
            .map_err(|_| DateParseError::Unrecognized(raw.to_string()))
    }

    /// Replace the relative marker or the month name with something chrono
    /// can parse. Relative markers become a fully spelled date.
    fn spell_out(&self, raw: &str) -> Result<String, DateParseError> {
        let relative = [(TODAY, self.today), (YESTERDAY, self.today - Duration::days(1))];
        for (marker, date) in relative {
            if raw.starts_with(marker) {
                let spelled = date.format("%d %B %Y").to_string();
                return Ok(raw.replacen(marker, &spelled, 1));
            }
        }

        let mut words = raw.split_whitespace();
        let (Some(_day), Some(month)) = (words.next(), words.next()) else {
            return Err(DateParseError::Unrecognized(raw.to_string()));
        };

        match MONTHS.iter().find(|(name, _)| *name == month) {
            Some((name, english)) => Ok(raw.replacen(name, english, 1)),
            None if month.chars().all(char::is_alphabetic) => {
                Err(DateParseError::UnknownMonth(month.to_string()))
            }
            None => Err(DateParseError::Unrecognized(raw.to_string())),
        }
    }
}
