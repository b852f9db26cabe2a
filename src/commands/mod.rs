//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;

// Re-export main command functions
pub use analyze::{analyze, execute_analyze, fold_lines, resolve_subject, validate_args, RunOutcome};
pub use models::AnalyzeArgs;
