//! JSON summary output writer.
//!
//! Writes the finalised statistics of a run to a JSON file.

use crate::aggregator::GcSummary;
use crate::utils::config::SUMMARY_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the analysed JVM / process
    pub subject: String,

    /// Lines read from the log, blank ones included
    pub lines_read: usize,

    /// Malformed lines skipped in tolerant mode
    pub lines_skipped: usize,

    pub events: u64,

    pub stats: GcSummary,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

impl JsonSummary {
    pub fn new(
        subject: impl Into<String>,
        lines_read: usize,
        lines_skipped: usize,
        events: u64,
        stats: GcSummary,
    ) -> Self {
        Self {
            version: SUMMARY_SCHEMA_VERSION.to_string(),
            subject: subject.into(),
            lines_read,
            lines_skipped,
            events,
            stats,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Write a summary to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(summary: &JsonSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON summary to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    debug!("JSON summary written ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Read a summary back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<JsonSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading JSON summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}

/// Validate that output path is writable
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
