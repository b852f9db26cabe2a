//! Turn raw log lines into collection events.
//!
//! Each line has the shape `<date>: <uptime>: <info>`, where `<info>` holds
//! one or more bracketed regions. Lines whose regions are all unrecognised
//! produce no events.

use super::brackets::bracket_contents;
use super::region::{classify_region, extract_measurement};
use super::schema::{CollectionEvent, CollectionKind};
use crate::utils::config::{DISPLAY_DATE_FORMAT, NAIVE_DATE_FORMATS, OFFSET_DATE_FORMATS};
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+):\s+(\S+):\s+(.*?)\s*$").expect("Invalid line pattern"));

/// The three colon-separated fields of a log line
#[derive(Debug, Clone, PartialEq)]
pub struct LineParts<'a> {
    pub date_stamp: &'a str,
    pub monotonic_seconds: f64,
    pub info: &'a str,
}

/// Split a line into date stamp, uptime seconds and collection info
///
/// The date stamp may itself contain colons; it ends at the first colon
/// followed by whitespace.
///
/// # Errors
/// * `ParseError::LineFormat` - the line does not have three fields, or the
///   uptime is not a decimal number
pub fn split_line(line: &str) -> Result<LineParts<'_>, ParseError> {
    let captures = LINE
        .captures(line)
        .ok_or_else(|| line_format_error(format!("expected `<date>: <seconds>: <info>`, got {:?}", line)))?;

    let date_stamp = captures.get(1).map_or("", |m| m.as_str());
    let seconds = captures.get(2).map_or("", |m| m.as_str());
    let info = captures.get(3).map_or("", |m| m.as_str());

    let monotonic_seconds = seconds
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| line_format_error(format!("invalid uptime seconds {:?}", seconds)))?;

    Ok(LineParts {
        date_stamp,
        monotonic_seconds,
        info,
    })
}

/// Normalise a date stamp into the display format (`01-Jun-2015 10:00:00`)
///
/// # Errors
/// * `ParseError::LineFormat` - no supported calendar format matches
pub fn normalize_date(stamp: &str) -> Result<String, ParseError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(stamp) {
        return Ok(parsed.format(DISPLAY_DATE_FORMAT).to_string());
    }

    for format in OFFSET_DATE_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(stamp, format) {
            return Ok(parsed.format(DISPLAY_DATE_FORMAT).to_string());
        }
    }

    for format in NAIVE_DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(stamp, format) {
            return Ok(parsed.format(DISPLAY_DATE_FORMAT).to_string());
        }
    }

    Err(line_format_error(format!("unrecognised date stamp {:?}", stamp)))
}

/// Builds collection events line by line
///
/// Keeps the uptime of the last event of each kind so intervals can be
/// computed; everything else is derived from the line itself.
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    last_seen: [Option<f64>; 2],
    line_number: usize,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines handed to `build` so far
    pub fn lines_seen(&self) -> usize {
        self.line_number
    }

    /// Parse one line into zero or more events, left to right
    ///
    /// Blank lines and lines without recognised regions yield no events.
    /// A failed line leaves the interval state untouched.
    ///
    /// # Errors
    /// * `ParseError::LineFormat` - the line is not `<date>: <seconds>: <info>`
    /// * `ParseError::Measurement` - a GC region lacks its pause or heap triple
    pub fn build(&mut self, line: &str) -> Result<Vec<CollectionEvent>, ParseError> {
        self.line_number += 1;
        let line_number = self.line_number;

        if line.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parts = split_line(line).map_err(|e| e.at_line(line_number))?;
        let wall_clock = normalize_date(parts.date_stamp).map_err(|e| e.at_line(line_number))?;

        let mut last_seen = self.last_seen;
        let mut events = Vec::new();

        for (depth, content) in bracket_contents(parts.info) {
            if depth != 0 {
                continue;
            }

            let Some(kind) = classify_region(content).kind() else {
                continue;
            };

            let measurement = extract_measurement(content).map_err(|e| e.at_line(line_number))?;

            let slot = &mut last_seen[kind.index()];
            let interval_seconds = slot.map(|previous| parts.monotonic_seconds - previous);
            if let Some(interval) = interval_seconds.filter(|i| *i < 0.0) {
                warn!(
                    "Line {}: uptime went backwards by {:.3}s for {} collections",
                    line_number, -interval, kind
                );
            }
            *slot = Some(parts.monotonic_seconds);

            events.push(CollectionEvent {
                kind,
                wall_clock: wall_clock.clone(),
                monotonic_seconds: parts.monotonic_seconds,
                pause_seconds: measurement.pause_seconds,
                heap: measurement.heap,
                sub_regions: measurement.sub_regions,
                interval_seconds,
            });
        }

        self.last_seen = last_seen;

        if !events.is_empty() {
            debug!("Line {}: {} collection event(s)", line_number, events.len());
        }

        Ok(events)
    }
}

fn line_format_error(reason: impl Into<String>) -> ParseError {
    ParseError::LineFormat {
        line_number: 0,
        reason: reason.into(),
    }
}
