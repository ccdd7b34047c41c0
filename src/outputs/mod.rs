//! Report outputs.
//!
//! # Submodules
//!
//! - [`table`]: Renders the weekly ranking as a text table for stdout
//! - [`json`]: Writes the same report as a JSON file for other tools

pub mod json;
pub mod table;
