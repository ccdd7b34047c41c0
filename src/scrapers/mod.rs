//! Article feed scrapers.
//!
//! A scraper turns a listing site into a flat list of
//! [`RawRecord`](crate::models::RawRecord)s (raw date text plus title). It
//! does no date or language processing of its own; that is the pipeline's job.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Habr "all" feed | [`habr`] | HTML scraping | Legacy and current listing markup |
//!
//! # Failure Policy
//!
//! - The first page failing aborts the run with a [`FetchError`]
//! - A later page failing stops paging; records already collected are kept
//! - A preview with missing markup is logged and skipped

use thiserror::Error;
use url::Url;

pub mod habr;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected markup at {url}: {reason}")]
    Markup { url: String, reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &Url, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Transport { .. } => "transport",
            Self::Markup { .. } => "markup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status {
            url: "https://habr.com/all/page2/".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://habr.com/all/page2/ answered with HTTP 503");
        assert_eq!(err.kind(), "status");

        let err = FetchError::Timeout {
            url: "https://habr.com/all/".to_string(),
        };
        assert_eq!(err.to_string(), "request to https://habr.com/all/ timed out");
        assert_eq!(err.kind(), "timeout");
    }
}
