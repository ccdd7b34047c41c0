//! Run settings, assembled once at startup and passed down explicitly.
//!
//! Values come from three layers, highest priority first:
//! 1. command-line flags ([`Cli`])
//! 2. the YAML file named by `--config`
//! 3. built-in defaults
//!
//! # Settings File
//!
//! ```yaml
//! pages: 10
//! top: 5
//! start_url: https://habr.com/all/
//! request_timeout_secs: 20
//! max_pacing_ms: 500
//! lexicon_path: ./my_words.yaml
//! ```

use crate::cli::Cli;
use crate::scrapers::habr::ScrapeOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_START_URL: &str = "https://habr.com/all/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Everything a run needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Highest listing page number to fetch.
    pub pages: u32,
    /// Nouns reported per week.
    pub top: usize,
    /// First listing page.
    pub start_url: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Upper bound of the random pause before each request.
    pub max_pacing_ms: u64,
    /// Extra dictionary merged over the built-in one.
    pub lexicon_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pages: 20,
            top: 3,
            start_url: DEFAULT_START_URL.to_string(),
            request_timeout_secs: 30,
            max_pacing_ms: 1000,
            lexicon_path: None,
        }
    }
}

impl Settings {
    /// Read a settings file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build the effective settings for this run.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let settings = base.with_overrides(cli);
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    /// Apply every flag the user actually passed.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(pages) = cli.pages {
            self.pages = pages;
        }
        if let Some(top) = cli.top {
            self.top = top;
        }
        if let Some(start_url) = &cli.start_url {
            self.start_url = start_url.clone();
        }
        if let Some(lexicon) = &cli.lexicon {
            self.lexicon_path = Some(lexicon.clone());
        }
        self
    }

    /// Connection parameters for the listing scraper.
    pub fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            start_url: self.start_url.clone(),
            pages: self.pages,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_pacing: Duration::from_millis(self.max_pacing_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pages, 20);
        assert_eq!(settings.top, 3);
        assert_eq!(settings.start_url, "https://habr.com/all/");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_temp("partial.yaml", "top: 7\n");
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.top, 7);
        assert_eq!(settings.pages, 20);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_cli_overrides_file() {
        let path = write_temp("override.yaml", "pages: 4\ntop: 7\nmax_pacing_ms: 0\n");
        let path_str = path.to_string_lossy().to_string();
        let cli = Cli::parse_from(["habr_nouns", "-c", path_str.as_str(), "-t", "2"]);

        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.pages, 4);
        assert_eq!(settings.top, 2);
        assert_eq!(settings.max_pacing_ms, 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let path = write_temp("unknown.yaml", "pagez: 4\n");
        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_scrape_options() {
        let settings = Settings {
            pages: 2,
            max_pacing_ms: 250,
            ..Settings::default()
        };
        let options = settings.scrape_options();
        assert_eq!(options.pages, 2);
        assert_eq!(options.request_timeout, Duration::from_secs(30));
        assert_eq!(options.max_pacing, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
