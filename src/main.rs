//! gcstat CLI
//!
//! Summarises pauses, heap occupancy and collection rates from a verbose
//! JVM GC log.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use gcstat::commands::{execute_analyze, validate_args, AnalyzeArgs};

/// gcstat - summary statistics for verbose GC logs
#[derive(Parser, Debug)]
#[command(name = "gcstat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose GC log (plain text or gzip)
    log_path: PathBuf,

    /// Name of the JVM / process shown in the report
    /// (defaults to the log's directory name)
    subject: Option<String>,

    /// Suppress everything except the report and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the performance results view instead of the summary
    #[arg(long)]
    results: bool,

    /// Skip malformed lines instead of aborting the run
    #[arg(long)]
    skip_malformed: bool,

    /// Report kinds with no collections instead of failing
    #[arg(long)]
    allow_missing_kind: bool,

    /// Also write the statistics as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AnalyzeArgs {
        log_path: cli.log_path,
        subject: cli.subject,
        results: cli.results,
        skip_malformed: cli.skip_malformed,
        allow_missing_kind: cli.allow_missing_kind,
        json_output: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)
}
