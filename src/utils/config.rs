//! Configuration and constants for the CLI.

/// Subject name used when none is given and none can be derived
pub const DEFAULT_SUBJECT_NAME: &str = "JVM";

/// Display format for normalised wall-clock stamps (e.g. `01-Jun-2015 10:00:00`)
pub const DISPLAY_DATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

// Date stamp formats printed by -XX:+PrintGCDateStamps and friends.
// Tried in order after RFC 3339.
pub const OFFSET_DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
pub const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Region labels for minor and full collections
pub const MINOR_GC_LABEL: &str = "GC";
pub const FULL_GC_LABEL: &str = "Full GC";

/// Nested region labels that denote a permanent-generation style area
pub const PERM_GEN_LABELS: &[&str] = &["PSPermGen", "PermGen", "CMS Perm", "Perm", "Metaspace"];

/// Leading bytes of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Current JSON summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";
