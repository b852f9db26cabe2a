//! The per-run aggregator.
//!
//! One `Aggregator` per analysed log. It owns a `RunningStats` per
//! collection kind plus a combined one and never buffers events.

use super::stats::{RunningStats, StatsScope, StatsSnapshot};
use crate::parser::schema::{CollectionEvent, CollectionKind};
use crate::utils::error::AggregateError;
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    by_kind: [RunningStats; 2],
    all: RunningStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one event: per-kind stats first, then the combined stats
    pub fn fold(&mut self, event: CollectionEvent) {
        trace!(
            "Folding {} collection at {:.3}s ({:.4}s pause)",
            event.kind,
            event.monotonic_seconds,
            event.pause_seconds
        );

        self.by_kind[event.kind.index()].fold(&event);
        self.all.fold(&event);
    }

    /// Number of events folded so far
    pub fn event_count(&self) -> u64 {
        self.all.count
    }

    pub fn stats(&self, scope: StatsScope) -> &RunningStats {
        match scope {
            StatsScope::Minor => &self.by_kind[CollectionKind::Minor.index()],
            StatsScope::Full => &self.by_kind[CollectionKind::Full.index()],
            StatsScope::All => &self.all,
        }
    }

    /// Final figures for one scope
    ///
    /// # Errors
    /// * `AggregateError::EmptyInput` - no event of that scope was folded
    pub fn finalize(&self, scope: StatsScope) -> Result<StatsSnapshot, AggregateError> {
        self.stats(scope).snapshot(scope)
    }

    /// Snapshots of every scope; empty scopes are `None`
    pub fn summary(&self) -> GcSummary {
        GcSummary {
            minor: self.finalize(StatsScope::Minor).ok(),
            full: self.finalize(StatsScope::Full).ok(),
            all: self.finalize(StatsScope::All).ok(),
        }
    }
}

/// Finalised statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcSummary {
    pub minor: Option<StatsSnapshot>,
    pub full: Option<StatsSnapshot>,
    pub all: Option<StatsSnapshot>,
}

impl GcSummary {
    pub fn get(&self, scope: StatsScope) -> Option<&StatsSnapshot> {
        match scope {
            StatsScope::Minor => self.minor.as_ref(),
            StatsScope::Full => self.full.as_ref(),
            StatsScope::All => self.all.as_ref(),
        }
    }

    /// Snapshot of a scope that the caller cannot report without
    ///
    /// # Errors
    /// * `AggregateError::EmptyInput` - the scope saw no events
    pub fn require(&self, scope: StatsScope) -> Result<&StatsSnapshot, AggregateError> {
        self.get(scope).ok_or(AggregateError::EmptyInput { scope })
    }
}
