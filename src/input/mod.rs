//! Log file input.
//!
//! Opens plain-text or gzip-compressed logs and yields their lines.

pub mod reader;

pub use reader::{open_log, LogReader};
