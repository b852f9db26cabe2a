//! Typed collection events produced by the parser.
//!
//! A `CollectionEvent` is built once per recognised region and handed to the
//! aggregator; nothing downstream mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection category of a recognised region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Young-generation style collection, labelled `GC`
    Minor,
    /// Whole-heap collection, labelled `Full GC`
    Full,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Minor, CollectionKind::Full];

    /// Stable slot for per-kind arrays
    pub(crate) fn index(self) -> usize {
        match self {
            CollectionKind::Minor => 0,
            CollectionKind::Full => 1,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Minor => write!(f, "minor"),
            CollectionKind::Full => write!(f, "full"),
        }
    }
}

/// Outcome of classifying a top-level bracketed region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionClass {
    Minor,
    Full,
    /// Any other annotation; skipped without error
    Other,
}

impl RegionClass {
    /// Collection kind for recognised regions
    pub fn kind(self) -> Option<CollectionKind> {
        match self {
            RegionClass::Minor => Some(CollectionKind::Minor),
            RegionClass::Full => Some(CollectionKind::Full),
            RegionClass::Other => None,
        }
    }
}

/// `before->after(capacity)` occupancy, in kilobytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapTriple {
    pub before_kb: u64,
    pub after_kb: u64,
    pub capacity_kb: u64,
}

impl HeapTriple {
    pub fn new(before_kb: u64, after_kb: u64, capacity_kb: u64) -> Self {
        Self {
            before_kb,
            after_kb,
            capacity_kb,
        }
    }

    /// Check that neither occupancy exceeds the capacity
    pub fn validate(&self) -> Result<(), String> {
        if self.before_kb > self.capacity_kb || self.after_kb > self.capacity_kb {
            return Err(format!(
                "occupancy {}K->{}K exceeds capacity {}K",
                self.before_kb, self.after_kb, self.capacity_kb
            ));
        }
        Ok(())
    }

    /// `after / capacity * 100`, `None` for a zero capacity
    pub fn after_pct(&self) -> Option<f64> {
        crate::utils::format::percentage(self.after_kb, self.capacity_kb)
    }
}

/// What a nested area inside a collection region represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubRegionKind {
    /// Permanent generation (or its metaspace successor)
    PermGen,
    /// Any other generation reported with a heap triple
    Other,
}

/// Measurement of one nested area, e.g. `[PSPermGen: 100K->100K(200K)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRegion {
    pub name: String,
    pub kind: SubRegionKind,
    pub heap: HeapTriple,
}

/// One parsed garbage collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEvent {
    pub kind: CollectionKind,

    /// Normalised calendar stamp, for display only
    pub wall_clock: String,

    /// Seconds since JVM start, used for deltas
    pub monotonic_seconds: f64,

    pub pause_seconds: f64,

    /// Whole-heap occupancy reported at the top level of the region
    pub heap: HeapTriple,

    /// Nested areas in left-to-right order
    pub sub_regions: Vec<SubRegion>,

    /// Time since the previous event of the same kind, `None` for the first
    pub interval_seconds: Option<f64>,
}

impl CollectionEvent {
    /// The permanent-generation measurement, if the line carried one
    pub fn perm_gen(&self) -> Option<&SubRegion> {
        self.sub_regions
            .iter()
            .find(|region| region.kind == SubRegionKind::PermGen)
    }
}
