//! # Habr Nouns
//!
//! Scans the Habr article feed and reports, for every calendar week, the
//! nouns that appeared most often in article titles.
//!
//! ## Usage
//!
//! ```sh
//! habr_nouns -p 10 -t 5
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Walk the listing pages and collect (date, title) pairs
//! 2. **Normalizing**: Turn locale dates ("вчера в 16:41") into calendar dates
//! 3. **Extracting**: Keep the nouns of each title, reduced to their lemma
//! 4. **Ranking**: Bucket lemmas into Monday-to-Sunday weeks and count them
//! 5. **Output**: Print a text table and optionally write a JSON report
//!
//! The table goes to stdout; logs go to stderr.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod dates;
mod models;
mod morph;
mod nouns;
mod outputs;
mod pipeline;
mod ranking;
mod scrapers;
mod utils;
mod weeks;

use cli::Cli;
use config::Settings;
use dates::DateNormalizer;
use morph::{DictionaryAnalyzer, Lexicon, MorphologicalClassifier};
use nouns::NounExtractor;
use outputs::{json, table};
use pipeline::Pipeline;

/// The built-in dictionary, with the user's dictionary merged over it.
fn load_lexicon(settings: &Settings) -> Result<Lexicon, Box<dyn Error>> {
    let mut lexicon = Lexicon::builtin()?;
    if let Some(path) = &settings.lexicon_path {
        let extra = Lexicon::from_path(path)?;
        if extra.is_empty() {
            warn!(path = %path, "User dictionary has no entries");
        }
        info!(path = %path, entries = extra.len(), "Merging user dictionary");
        lexicon.merge(extra);
    }
    Ok(lexicon)
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("habr_nouns starting up");

    // Parse CLI and settings
    let args = Cli::parse();
    let settings = Settings::resolve(&args)?;
    info!(
        pages = settings.pages,
        top = settings.top,
        start_url = %settings.start_url,
        "Resolved settings"
    );

    // ---- Analyzer ----
    let lexicon = load_lexicon(&settings)?;
    let classifier = MorphologicalClassifier::new(DictionaryAnalyzer::new(lexicon));
    info!(
        entries = classifier.analyzer().lexicon().len(),
        "Morphological analyzer ready"
    );
    let extractor = NounExtractor::new(&classifier);
    let normalizer = DateNormalizer::new();
    debug!(today = %normalizer.today(), "Date normalizer ready");

    // ---- Fetch ----
    let records = match scrapers::habr::fetch_records(&settings.scrape_options()).await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Could not fetch the first listing page");
            return Err(e.into());
        }
    };

    // ---- Analyze ----
    let report = Pipeline::new(&normalizer, &extractor, settings.top).run(records);

    // ---- Output ----
    print!("{}", table::render_table(&report.weeks));

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir, Local::now().date_naive()).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        weeks = report.weeks.len(),
        records = report.records_seen,
        skipped = report.records_skipped,
        "Execution complete"
    );

    Ok(())
}
