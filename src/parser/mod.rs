//! Log line parsing.
//!
//! This module handles:
//! - Extracting nested `[...]` regions from a line
//! - Classifying regions as minor / full collections
//! - Extracting pause, heap and sub-region measurements
//! - Building typed collection events

pub mod brackets;
pub mod event;
pub mod region;
pub mod schema;

// Re-export main types
pub use brackets::{bracket_contents, direct_children, top_level_text, Brackets};
pub use event::{normalize_date, split_line, EventBuilder, LineParts};
pub use region::{classify_region, extract_measurement, Measurement};
pub use schema::{
    CollectionEvent, CollectionKind, HeapTriple, RegionClass, SubRegion, SubRegionKind,
};
