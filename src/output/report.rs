//! Human-readable run reports.
//!
//! Two layouts are available: the summary report, which mirrors the
//! classic verbose-GC summary, and a results view focused on GC overhead.

use crate::aggregator::{GcSummary, StatsScope, StatsSnapshot};
use crate::utils::error::AggregateError;
use crate::utils::format::format_duration;
use std::fmt::Write;

/// Knobs for the report writers
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Render "no collections" for an empty kind instead of failing
    pub allow_missing_kind: bool,
}

/// Render the summary report
///
/// # Errors
/// * `AggregateError::EmptyInput` - no collection at all was seen, or a
///   kind is empty and `allow_missing_kind` is off
pub fn render_report(
    subject: &str,
    summary: &GcSummary,
    options: ReportOptions,
) -> Result<String, AggregateError> {
    let all = summary.require(StatsScope::All)?;
    let full = kind_snapshot(summary, StatsScope::Full, options)?;
    let minor = kind_snapshot(summary, StatsScope::Minor, options)?;

    let mut report = String::new();

    let _ = writeln!(
        report,
        "*** Analyzed GC activity for {} from {} to {} ({})",
        subject,
        all.first.wall_clock,
        all.last.wall_clock,
        format_duration(all.elapsed_seconds)
    );

    match full {
        Some(full) => {
            let _ = writeln!(
                report,
                "The max heap used memory (after a full GC) was {}K [{}] on {}.",
                full.heap_after_max.after_kb,
                format_pct(full.heap_after_max.after_pct()),
                full.heap_after_max.wall_clock
            );
        }
        None => {
            let _ = writeln!(
                report,
                "The max heap used memory (after any GC) was {}K [{}] on {}.",
                all.heap_after_max.after_kb,
                format_pct(all.heap_after_max.after_pct()),
                all.heap_after_max.wall_clock
            );
        }
    }

    if let Some(perm) = &all.sub_region_after_max_pct {
        let _ = writeln!(
            report,
            "The max PSPermGen memory usage was {:.2}% on {}.",
            perm.value, perm.wall_clock
        );
    }

    let _ = writeln!(
        report,
        "The max pause time was {:.1}s on {}.",
        all.pause_max.value, all.pause_max.wall_clock
    );

    for (label, snapshot) in [("full", full), ("minor", minor)] {
        match snapshot {
            Some(snapshot) => {
                let _ = writeln!(
                    report,
                    "Performed {} {} GCs, with a pause time of {:.2}s (avg) at {} (avg) intervals, avg heap after {:.0}K.",
                    snapshot.count,
                    label,
                    snapshot.avg_pause_seconds,
                    format_interval(snapshot.avg_interval_seconds),
                    snapshot.avg_heap_after_kb
                );
            }
            None => {
                let _ = writeln!(report, "Performed no {} GCs.", label);
            }
        }
    }

    report.push_str("***\n");

    Ok(report)
}

/// Render the results view: overhead, throughput and rates per kind
///
/// # Errors
/// Same as [`render_report`].
pub fn render_results(
    subject: &str,
    summary: &GcSummary,
    options: ReportOptions,
) -> Result<String, AggregateError> {
    let all = summary.require(StatsScope::All)?;
    let full = kind_snapshot(summary, StatsScope::Full, options)?;
    let minor = kind_snapshot(summary, StatsScope::Minor, options)?;

    let mut report = String::new();

    let _ = writeln!(report, "=== GC results for {} ===", subject);
    let _ = writeln!(
        report,
        "Span:        {} ({} to {})",
        format_duration(all.elapsed_seconds),
        all.first.wall_clock,
        all.last.wall_clock
    );

    match overhead_pct(all) {
        Some(overhead) => {
            let _ = writeln!(report, "GC overhead: {:.2}%", overhead);
            let _ = writeln!(report, "Throughput:  {:.2}%", 100.0 - overhead);
        }
        None => {
            let _ = writeln!(report, "GC overhead: n/a");
            let _ = writeln!(report, "Throughput:  n/a");
        }
    }

    let _ = writeln!(
        report,
        "{:<6} {:>8} {:>12} {:>12} {:>12} {:>10}",
        "kind", "count", "total(s)", "avg(s)", "max(s)", "per hour"
    );

    for (label, snapshot) in [("minor", minor), ("full", full), ("all", Some(all))] {
        match snapshot {
            Some(snapshot) => {
                let _ = writeln!(
                    report,
                    "{:<6} {:>8} {:>12.3} {:>12.4} {:>12.4} {:>10}",
                    label,
                    snapshot.count,
                    snapshot.total_pause_seconds,
                    snapshot.avg_pause_seconds,
                    snapshot.pause_max.value,
                    per_hour(snapshot.count, all.elapsed_seconds)
                        .map_or_else(|| "n/a".to_string(), |rate| format!("{:.1}", rate))
                );
            }
            None => {
                let _ = writeln!(report, "{:<6} {:>8}", label, 0);
            }
        }
    }

    Ok(report)
}

/// Percentage of the observed span spent in GC pauses
pub fn overhead_pct(all: &StatsSnapshot) -> Option<f64> {
    if all.elapsed_seconds > 0.0 {
        Some((all.total_pause_seconds / all.elapsed_seconds * 100.0).min(100.0))
    } else {
        None
    }
}

fn per_hour(count: u64, elapsed_seconds: f64) -> Option<f64> {
    if elapsed_seconds > 0.0 {
        Some(count as f64 / elapsed_seconds * 3600.0)
    } else {
        None
    }
}

fn kind_snapshot(
    summary: &GcSummary,
    scope: StatsScope,
    options: ReportOptions,
) -> Result<Option<&StatsSnapshot>, AggregateError> {
    match summary.require(scope) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(_) if options.allow_missing_kind => Ok(None),
        Err(e) => Err(e),
    }
}

fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "n/a".to_string(), |pct| format!("{:.2}%", pct))
}

fn format_interval(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| "n/a".to_string(), format_duration)
}
