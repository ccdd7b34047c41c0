//! Command-line interface definitions for Habr Nouns.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Flags override values from the optional YAML settings file; see
//! [`crate::config::Settings`] for the defaults.

use clap::Parser;

/// Command-line arguments for the Habr Nouns application.
///
/// # Examples
///
/// ```sh
/// # Defaults: 20 pages, top 3 nouns per week
/// habr_nouns
///
/// # Scan 5 pages and show 10 nouns per week
/// habr_nouns -p 5 -t 10
///
/// # Also write a JSON report
/// habr_nouns -j ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of listing pages to scan [default: 20]
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// Number of nouns to show per week [default: 3]
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for a JSON copy of the report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// First listing page to scan
    #[arg(long, env = "HABR_START_URL")]
    pub start_url: Option<String>,

    /// Extra YAML dictionary merged over the built-in one
    #[arg(long)]
    pub lexicon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_are_unset() {
        let cli = Cli::parse_from(["habr_nouns"]);
        assert_eq!(cli.pages, None);
        assert_eq!(cli.top, None);
        assert_eq!(cli.json_output_dir, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["habr_nouns", "-p", "5", "-t", "10", "-j", "/tmp/json"]);

        assert_eq!(cli.pages, Some(5));
        assert_eq!(cli.top, Some(10));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "habr_nouns",
            "--pages",
            "2",
            "--top",
            "0",
            "--config",
            "settings.yaml",
            "--lexicon",
            "extra.yaml",
        ]);

        assert_eq!(cli.pages, Some(2));
        assert_eq!(cli.top, Some(0));
        assert_eq!(cli.config.as_deref(), Some("settings.yaml"));
        assert_eq!(cli.lexicon.as_deref(), Some("extra.yaml"));
    }

    #[test]
    fn test_cli_rejects_negative_top() {
        assert!(Cli::try_parse_from(["habr_nouns", "-t", "-1"]).is_err());
    }
}
