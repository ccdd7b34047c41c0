//! JSON copy of the weekly report.
//!
//! # Output Structure
//!
//! One file per run day; a second run on the same day overwrites it:
//! ```text
//! json_output_dir/
//! ├── weekly_nouns_2026-10-14.json
//! └── weekly_nouns_2026-10-15.json
//! ```

use crate::models::WeeklyReport;
use crate::utils::ensure_writable_dir;
use chrono::NaiveDate;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the report file for `run_date` inside `json_output_dir`.
pub fn report_path(json_output_dir: &str, run_date: NaiveDate) -> PathBuf {
    PathBuf::from(json_output_dir).join(format!(
        "weekly_nouns_{}.json",
        run_date.format("%Y-%m-%d")
    ))
}

/// Serialize a [`WeeklyReport`] to `{json_output_dir}/weekly_nouns_{date}.json`.
///
/// The directory is created and probed for write access first.
///
/// # Returns
///
/// The path written on success.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &WeeklyReport,
    json_output_dir: &str,
    run_date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = ensure_writable_dir(json_output_dir).await {
        error!(error = %e, "JSON output directory is not writable");
        return Err(e);
    }

    let path = report_path(json_output_dir, run_date);
    info!(path = %path.display(), weeks = report.weeks.len(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");

    Ok(path)
}
