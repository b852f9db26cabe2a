//! Aggregation of collection events into running statistics.
//!
//! This module folds parsed events into:
//! - Per-kind counts, sums and maxima (minor / full)
//! - The same figures across all kinds
//! - Finalised snapshots for the report writers

pub mod collector;
pub mod stats;

// Re-export main types
pub use collector::{Aggregator, GcSummary};
pub use stats::{HeapPeak, Peak, RunningStats, Stamp, StatsScope, StatsSnapshot};
