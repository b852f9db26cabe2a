//! Output writers for run summaries.
//!
//! This module renders aggregated statistics:
//! - Text summary report (default)
//! - Results view focused on GC overhead (`--results`)
//! - JSON summary files

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_summary, write_summary, JsonSummary};
pub use report::{render_report, render_results, ReportOptions};
