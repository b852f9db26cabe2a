use flate2::write::GzEncoder;
use flate2::Compression;
use gcstat::commands::{analyze, validate_args, AnalyzeArgs};
use gcstat::output::read_summary;
use gcstat::utils::error::{AggregateError, InputError, ParseError};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GC_LOG: &str = "\
2015-06-01T10:00:00.000+0000: 10.000: [GC [PSYoungGen: 1000K->200K(2000K)] 5000K->3000K(8000K), 0.2000000 secs] [Times: user=0.20 sys=0.00, real=0.20 secs]
2015-06-01T10:01:00.000+0000: 70.000: [Full GC [PSYoungGen: 200K->0K(2000K)] [ParOldGen: 2800K->2000K(6000K)] 3000K->2000K(8000K) [PSPermGen: 3000K->3000K(6000K)], 1.5000000 secs] [Times: user=1.50 sys=0.00, real=1.50 secs]

2015-06-01T10:02:00.000+0000: 130.000: [GC [PSYoungGen: 1000K->100K(2000K)] 6000K->4000K(8000K), 0.4000000 secs] [Times: user=0.40 sys=0.00, real=0.40 secs]
";

const EXPECTED_REPORT: &str = "\
*** Analyzed GC activity for orders from 01-Jun-2015 10:00:00 to 01-Jun-2015 10:02:00 (02m 00s)
The max heap used memory (after a full GC) was 2000K [25.00%] on 01-Jun-2015 10:01:00.
The max PSPermGen memory usage was 50.00% on 01-Jun-2015 10:01:00.
The max pause time was 1.5s on 01-Jun-2015 10:01:00.
Performed 1 full GCs, with a pause time of 1.50s (avg) at n/a (avg) intervals, avg heap after 2000K.
Performed 2 minor GCs, with a pause time of 0.30s (avg) at 02m 00s (avg) intervals, avg heap after 3500K.
***
";

fn write_log(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn args_for(log_path: PathBuf) -> AnalyzeArgs {
    AnalyzeArgs {
        log_path,
        subject: Some("orders".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_analyze_plain_log() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), "gc.log", GC_LOG.as_bytes());

    let report = analyze(&args_for(log)).unwrap();
    assert_eq!(report, EXPECTED_REPORT);
}

#[test]
fn test_analyze_gzip_log() {
    let dir = TempDir::new().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(GC_LOG.as_bytes()).unwrap();
    let log = write_log(dir.path(), "gc.log.0", &encoder.finish().unwrap());

    let report = analyze(&args_for(log)).unwrap();
    assert_eq!(report, EXPECTED_REPORT);
}

#[test]
fn test_analyze_writes_json() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), "gc.log", GC_LOG.as_bytes());
    let json_path = dir.path().join("out").join("summary.json");

    let args = AnalyzeArgs {
        json_output: Some(json_path.clone()),
        ..args_for(log)
    };
    analyze(&args).unwrap();

    let summary = read_summary(&json_path).unwrap();
    assert_eq!(summary.subject, "orders");
    assert_eq!(summary.lines_read, 4);
    assert_eq!(summary.lines_skipped, 0);
    assert_eq!(summary.events, 3);
    assert_eq!(summary.stats.full.as_ref().unwrap().count, 1);
    assert_eq!(summary.stats.minor.as_ref().unwrap().count, 2);
}

#[test]
fn test_analyze_results_view() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), "gc.log", GC_LOG.as_bytes());

    let args = AnalyzeArgs {
        results: true,
        ..args_for(log)
    };
    let report = analyze(&args).unwrap();

    assert!(report.starts_with("=== GC results for orders ==="));
    assert!(report.contains("GC overhead: 1.75%"));
}

#[test]
fn test_analyze_malformed_line_aborts() {
    let dir = TempDir::new().unwrap();
    let contents = format!("{}Heap\n PSYoungGen total 2048K, used 100K\n", GC_LOG);
    let log = write_log(dir.path(), "gc.log", contents.as_bytes());

    let err = analyze(&args_for(log)).unwrap_err();
    let parse = err.downcast_ref::<ParseError>().unwrap();
    assert!(matches!(parse, ParseError::LineFormat { line_number: 5, .. }));
}

#[test]
fn test_analyze_skip_malformed() {
    let dir = TempDir::new().unwrap();
    let contents = format!("{}Heap\n PSYoungGen total 2048K, used 100K\n", GC_LOG);
    let log = write_log(dir.path(), "gc.log", contents.as_bytes());
    let json_path = dir.path().join("summary.json");

    let args = AnalyzeArgs {
        skip_malformed: true,
        json_output: Some(json_path.clone()),
        ..args_for(log)
    };
    let report = analyze(&args).unwrap();
    assert_eq!(report, EXPECTED_REPORT);

    let summary = read_summary(&json_path).unwrap();
    assert_eq!(summary.lines_skipped, 2);
}

#[test]
fn test_analyze_missing_full_collections() {
    let dir = TempDir::new().unwrap();
    let minor_only: String = GC_LOG
        .lines()
        .filter(|line| !line.contains("Full GC"))
        .map(|line| format!("{}\n", line))
        .collect();
    let log = write_log(dir.path(), "gc.log", minor_only.as_bytes());

    let err = analyze(&args_for(log.clone())).unwrap_err();
    assert_eq!(
        err.downcast_ref::<AggregateError>(),
        Some(&AggregateError::EmptyInput {
            scope: gcstat::aggregator::StatsScope::Full
        })
    );

    let args = AnalyzeArgs {
        allow_missing_kind: true,
        ..args_for(log)
    };
    let report = analyze(&args).unwrap();
    assert!(report.contains("Performed no full GCs."));
    assert!(report.contains("Performed 2 minor GCs"));
}

#[test]
fn test_analyze_missing_file() {
    let err = analyze(&args_for(PathBuf::from("/definitely/not/here.log"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::Open { .. })
    ));
}

#[test]
fn test_subject_defaults_to_directory() {
    let dir = TempDir::new().unwrap();
    let app_dir = dir.path().join("payments");
    std::fs::create_dir(&app_dir).unwrap();
    let log = write_log(&app_dir, "gc.log", GC_LOG.as_bytes());

    let args = AnalyzeArgs {
        log_path: log,
        ..Default::default()
    };
    let report = analyze(&args).unwrap();
    assert!(report.starts_with("*** Analyzed GC activity for payments from"));
}

#[test]
fn test_validate_args() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), "gc.log", GC_LOG.as_bytes());

    assert!(validate_args(&args_for(log)).is_ok());
    assert!(validate_args(&args_for(dir.path().to_path_buf())).is_err());
    assert!(validate_args(&args_for(PathBuf::new())).is_err());
}
