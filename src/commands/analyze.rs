//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Opens the log (plain or gzip)
//! 2. Parses every line into collection events
//! 3. Folds events into running statistics
//! 4. Renders the report (and optional JSON summary)

use super::models::AnalyzeArgs;
use crate::aggregator::Aggregator;
use crate::input::open_log;
use crate::output::{render_report, render_results, write_summary, JsonSummary, ReportOptions};
use crate::parser::EventBuilder;
use crate::utils::config::DEFAULT_SUBJECT_NAME;
use crate::utils::error::InputError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Outcome of folding a whole log
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub aggregator: Aggregator,
    pub lines_read: usize,
    pub lines_skipped: usize,
}

/// Execute the analyze command and print the report to stdout
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let report = analyze(&args)?;
    print!("{}", report);
    Ok(())
}

/// Run the whole pipeline and return the rendered report
///
/// # Errors
/// * File open / decompression failures
/// * Malformed lines (unless `skip_malformed`)
/// * Empty collection kinds (unless `allow_missing_kind`)
/// * JSON write errors
pub fn analyze(args: &AnalyzeArgs) -> Result<String> {
    let start_time = Instant::now();
    let subject = resolve_subject(&args.log_path, args.subject.as_deref());

    info!("Analyzing GC log for {}: {}", subject, args.log_path.display());

    // Step 1: Open log
    info!("Step 1/3: Opening log...");
    let reader = open_log(&args.log_path).context("Failed to open GC log")?;

    // Step 2: Parse and fold
    info!("Step 2/3: Parsing collections...");
    let outcome = fold_lines(reader, args.skip_malformed)?;

    info!(
        "Parsed {} lines: {} collections, {} skipped",
        outcome.lines_read,
        outcome.aggregator.event_count(),
        outcome.lines_skipped
    );

    // Step 3: Render
    info!("Step 3/3: Rendering report...");
    let summary = outcome.aggregator.summary();
    let options = ReportOptions {
        allow_missing_kind: args.allow_missing_kind,
    };

    let rendered = if args.results {
        render_results(&subject, &summary, options)
    } else {
        render_report(&subject, &summary, options)
    };
    let report = rendered.context("Failed to build GC report")?;

    if let Some(json_path) = &args.json_output {
        let json = JsonSummary::new(
            subject.clone(),
            outcome.lines_read,
            outcome.lines_skipped,
            outcome.aggregator.event_count(),
            summary,
        );
        write_summary(&json, json_path).context("Failed to write JSON summary")?;
        info!("✓ JSON summary written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Parse and fold a sequence of lines
///
/// Lines are consumed strictly in order. With `skip_malformed` a line that
/// fails to parse is logged and skipped; otherwise the first failure ends
/// the run.
pub fn fold_lines<I>(lines: I, skip_malformed: bool) -> Result<RunOutcome>
where
    I: IntoIterator<Item = Result<String, InputError>>,
{
    let mut builder = EventBuilder::new();
    let mut aggregator = Aggregator::new();
    let mut lines_skipped = 0;

    for line in lines {
        let line = line.context("Failed to read GC log")?;

        match builder.build(&line) {
            Ok(events) => events.into_iter().for_each(|event| aggregator.fold(event)),
            Err(e) if skip_malformed => {
                warn!("Skipping: {}", e);
                lines_skipped += 1;
            }
            Err(e) => return Err(e).context("Failed to parse GC log"),
        }
    }

    debug!("Folded {} collection events", aggregator.event_count());

    Ok(RunOutcome {
        aggregator,
        lines_read: builder.lines_seen(),
        lines_skipped,
    })
}

/// Subject name: explicit, else the log's parent directory, else the default
pub fn resolve_subject(log_path: &Path, subject: Option<&str>) -> String {
    if let Some(subject) = subject.map(str::trim).filter(|s| !s.is_empty()) {
        return subject.to_string();
    }

    log_path
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(log_path)
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_SUBJECT_NAME)
        .to_string()
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.log_path.as_os_str().is_empty() {
        anyhow::bail!("Log path cannot be empty");
    }

    if !args.log_path.exists() {
        anyhow::bail!("Log file not found: {}", args.log_path.display());
    }

    if args.log_path.is_dir() {
        anyhow::bail!("Log path is a directory: {}", args.log_path.display());
    }

    if let Some(json_path) = &args.json_output {
        crate::output::json::validate_output_path(json_path)?;
    }

    Ok(())
}
