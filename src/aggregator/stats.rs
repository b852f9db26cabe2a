//! Running statistics over a stream of collection events.
//!
//! Every quantity is updated in place as events arrive, so memory stays
//! constant no matter how long the log is.

use crate::parser::schema::{CollectionEvent, CollectionKind};
use crate::utils::error::AggregateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which events a `RunningStats` covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsScope {
    Minor,
    Full,
    /// Every collection regardless of kind
    All,
}

impl From<CollectionKind> for StatsScope {
    fn from(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Minor => StatsScope::Minor,
            CollectionKind::Full => StatsScope::Full,
        }
    }
}

impl fmt::Display for StatsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsScope::Minor => write!(f, "minor"),
            StatsScope::Full => write!(f, "full"),
            StatsScope::All => write!(f, "GC"),
        }
    }
}

/// A point in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub wall_clock: String,
    pub monotonic_seconds: f64,
}

impl Stamp {
    fn of(event: &CollectionEvent) -> Self {
        Self {
            wall_clock: event.wall_clock.clone(),
            monotonic_seconds: event.monotonic_seconds,
        }
    }
}

/// A maximum together with where it was first reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub value: f64,
    pub wall_clock: String,
}

/// Largest heap-after occupancy, with the capacity at that moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapPeak {
    pub after_kb: u64,
    pub capacity_kb: u64,
    pub wall_clock: String,
}

impl HeapPeak {
    pub fn after_pct(&self) -> Option<f64> {
        crate::utils::format::percentage(self.after_kb, self.capacity_kb)
    }
}

/// Running totals and maxima for one scope
///
/// Counts and sums only grow; maxima only move up, ties keep the first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    pub count: u64,
    pub pause_sum: f64,
    pub interval_sum: f64,
    pub interval_count: u64,
    pub heap_after_sum: u64,
    pub heap_after_max: Option<HeapPeak>,
    pub pause_max: Option<Peak>,
    pub sub_region_after_max_pct: Option<Peak>,
    pub first: Option<Stamp>,
    pub last: Option<Stamp>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fold one event into the totals
    ///
    /// The interval is measured from the previous event seen by this scope,
    /// so the combined scope counts gaps between collections of any kind.
    pub fn fold(&mut self, event: &CollectionEvent) {
        if let Some(last) = &self.last {
            self.interval_sum += event.monotonic_seconds - last.monotonic_seconds;
            self.interval_count += 1;
        } else {
            self.first = Some(Stamp::of(event));
        }
        self.last = Some(Stamp::of(event));

        self.count += 1;
        self.pause_sum += event.pause_seconds;
        self.heap_after_sum = self.heap_after_sum.saturating_add(event.heap.after_kb);

        if self
            .heap_after_max
            .as_ref()
            .map_or(true, |peak| event.heap.after_kb > peak.after_kb)
        {
            self.heap_after_max = Some(HeapPeak {
                after_kb: event.heap.after_kb,
                capacity_kb: event.heap.capacity_kb,
                wall_clock: event.wall_clock.clone(),
            });
        }

        raise_peak(&mut self.pause_max, event.pause_seconds, &event.wall_clock);

        if let Some(pct) = event.perm_gen().and_then(|region| region.heap.after_pct()) {
            raise_peak(&mut self.sub_region_after_max_pct, pct, &event.wall_clock);
        }
    }

    /// Derived view for reporting
    ///
    /// # Errors
    /// * `AggregateError::EmptyInput` - nothing was folded into this scope
    pub fn snapshot(&self, scope: StatsScope) -> Result<StatsSnapshot, AggregateError> {
        let (Some(first), Some(last), Some(heap_after_max), Some(pause_max)) = (
            self.first.clone(),
            self.last.clone(),
            self.heap_after_max.clone(),
            self.pause_max.clone(),
        ) else {
            return Err(AggregateError::EmptyInput { scope });
        };

        let count = self.count as f64;
        let avg_interval_seconds = if self.interval_count > 0 {
            Some(self.interval_sum / self.interval_count as f64)
        } else {
            None
        };

        Ok(StatsSnapshot {
            scope,
            count: self.count,
            total_pause_seconds: self.pause_sum,
            avg_pause_seconds: self.pause_sum / count,
            avg_interval_seconds,
            avg_heap_after_kb: self.heap_after_sum as f64 / count,
            elapsed_seconds: last.monotonic_seconds - first.monotonic_seconds,
            heap_after_max,
            pause_max,
            sub_region_after_max_pct: self.sub_region_after_max_pct.clone(),
            first,
            last,
        })
    }
}

fn raise_peak(peak: &mut Option<Peak>, value: f64, wall_clock: &str) {
    if peak.as_ref().map_or(true, |current| value > current.value) {
        *peak = Some(Peak {
            value,
            wall_clock: wall_clock.to_string(),
        });
    }
}

/// Final figures for one scope, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub scope: StatsScope,
    pub count: u64,
    pub total_pause_seconds: f64,
    pub avg_pause_seconds: f64,
    /// `None` when the scope saw a single event
    pub avg_interval_seconds: Option<f64>,
    pub avg_heap_after_kb: f64,
    pub elapsed_seconds: f64,
    pub heap_after_max: HeapPeak,
    pub pause_max: Peak,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_region_after_max_pct: Option<Peak>,
    pub first: Stamp,
    pub last: Stamp,
}
