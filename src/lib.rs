//! gcstat
//!
//! Summary statistics for verbose JVM garbage-collector logs.
//!
//! The library splits the work into a pipeline:
//!
//! - [`parser`] turns each log line into typed collection events
//! - [`aggregator`] folds events into running per-kind statistics
//! - [`output`] renders the final statistics
//!
//! ```bash
//! gcstat /var/log/app/gc.log.gz billing
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod utils;
