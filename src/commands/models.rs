use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Verbose GC log, plain text or gzip
    pub log_path: PathBuf,

    /// Name shown in the report (derived from the log's directory if None)
    pub subject: Option<String>,

    /// Print the results view instead of the summary report
    pub results: bool,

    /// Skip malformed lines instead of aborting
    pub skip_malformed: bool,

    /// Report a kind with no collections instead of failing
    pub allow_missing_kind: bool,

    /// Output path for a JSON summary (optional)
    pub json_output: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("gc.log"),
            subject: None,
            results: false,
            skip_malformed: false,
            allow_missing_kind: false,
            json_output: None,
        }
    }
}
