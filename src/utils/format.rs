//! Human-readable formatting helpers shared by the report writers.

/// Format a number of seconds as `HHh MMm SSs`, `MMm SSs` or `SSs`
///
/// Fractional seconds are truncated, the leading unit is only shown when
/// it is non-zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}h {:02}m {:02}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{:02}m {:02}s", minutes, secs)
    } else {
        format!("{:02}s", secs)
    }
}

/// Percentage of `part` in `whole`, `None` when `whole` is zero
pub fn percentage(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}
