//! Classification and measurement of top-level collection regions.

use super::brackets::{direct_children, top_level_text};
use super::schema::{HeapTriple, RegionClass, SubRegion, SubRegionKind};
use crate::utils::config::{FULL_GC_LABEL, MINOR_GC_LABEL, PERM_GEN_LABELS};
use crate::utils::error::ParseError;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEAP_TRIPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)K->(\d+)K\((\d+)K\)").expect("Invalid heap triple pattern"));

// The number must start a token so `0,0123 secs` is not read as `0123`.
static PAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s=])(\d+(?:\.\d+)?)\s+secs\b").expect("Invalid pause pattern")
});

/// Measurements recovered from one collection region
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub pause_seconds: f64,
    pub heap: HeapTriple,
    pub sub_regions: Vec<SubRegion>,
}

/// Classify a top-level region by its label
///
/// The label is the text before the first nested bracket or the first
/// measurement digit, whichever comes first.
pub fn classify_region(content: &str) -> RegionClass {
    let label = content
        .split(|c: char| c == '[' || c.is_ascii_digit())
        .next()
        .unwrap_or_default()
        .trim();

    match label {
        MINOR_GC_LABEL => RegionClass::Minor,
        FULL_GC_LABEL => RegionClass::Full,
        _ => RegionClass::Other,
    }
}

/// Extract pause, heap triple and nested areas from a classified region
///
/// Errors carry line number 0; the event builder attributes them.
///
/// # Errors
/// * `ParseError::Measurement` - no pause, zero or several top-level heap
///   triples, or a triple whose occupancy exceeds its capacity
pub fn extract_measurement(content: &str) -> Result<Measurement, ParseError> {
    let top_level = top_level_text(content);

    let pause_seconds = extract_pause(&top_level)
        .or_else(|| extract_pause(content))
        .ok_or_else(|| measurement_error("no pause duration (`<n> secs`) found"))?;

    let mut triples = HEAP_TRIPLE.captures_iter(&top_level);
    let heap = match (triples.next(), triples.next()) {
        (Some(captures), None) => parse_triple(&captures)?,
        (None, _) => return Err(measurement_error("no heap triple found at top level")),
        (Some(_), Some(_)) => {
            return Err(measurement_error(
                "more than one heap triple found at top level",
            ))
        }
    };
    heap.validate().map_err(measurement_error)?;

    let sub_regions = direct_children(content)
        .map(extract_sub_region)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    Ok(Measurement {
        pause_seconds,
        heap,
        sub_regions,
    })
}

/// Parse one nested area; `Ok(None)` for areas without a usable triple
fn extract_sub_region(child: &str) -> Result<Option<SubRegion>, ParseError> {
    let name = sub_region_label(child);
    let kind = if PERM_GEN_LABELS.contains(&name) {
        SubRegionKind::PermGen
    } else {
        SubRegionKind::Other
    };

    let top_level = top_level_text(child);
    let heap = match HEAP_TRIPLE.captures(&top_level) {
        Some(captures) => parse_triple(&captures)?,
        None if kind == SubRegionKind::PermGen => {
            return Err(measurement_error(format!("no heap triple in {} region", name)))
        }
        None => {
            debug!("Ignoring nested region without heap triple: {}", name);
            return Ok(None);
        }
    };

    if let Err(reason) = heap.validate() {
        if kind == SubRegionKind::PermGen {
            return Err(measurement_error(format!("{}: {}", name, reason)));
        }
        debug!("Ignoring nested region {}: {}", name, reason);
        return Ok(None);
    }

    Ok(Some(SubRegion {
        name: name.to_string(),
        kind,
        heap,
    }))
}

/// `PSPermGen: 1K->1K(2K)` -> `PSPermGen`, `CMS Perm : ...` -> `CMS Perm`
fn sub_region_label(child: &str) -> &str {
    match child.split_once(':') {
        Some((label, _)) => label.trim(),
        None => child.split_whitespace().next().unwrap_or_default(),
    }
}

fn extract_pause(text: &str) -> Option<f64> {
    PAUSE
        .captures(text)
        .and_then(|captures| captures[1].parse::<f64>().ok())
}

fn parse_triple(captures: &Captures<'_>) -> Result<HeapTriple, ParseError> {
    let field = |index: usize| {
        captures[index]
            .parse::<u64>()
            .map_err(|e| measurement_error(format!("invalid size {}K: {}", &captures[index], e)))
    };

    Ok(HeapTriple::new(field(1)?, field(2)?, field(3)?))
}

fn measurement_error(reason: impl Into<String>) -> ParseError {
    ParseError::Measurement {
        line_number: 0,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_labels() {
        assert_eq!(
            classify_region("GC [PSYoungGen: 1K->0K(2K)] 5K->3K(8K), 0.1 secs"),
            RegionClass::Minor
        );
        assert_eq!(
            classify_region("Full GC [PSYoungGen: 1K->0K(2K)] 5K->3K(8K), 0.1 secs"),
            RegionClass::Full
        );
        assert_eq!(classify_region("  GC   [x]"), RegionClass::Minor);
    }

    #[test]
    fn test_classify_other_labels() {
        assert_eq!(
            classify_region("GC (Allocation Failure) [PSYoungGen: 1K->0K(2K)]"),
            RegionClass::Other
        );
        assert_eq!(
            classify_region("Times: user=0.01 sys=0.00, real=0.01 secs"),
            RegionClass::Other
        );
        assert_eq!(classify_region("gc [x]"), RegionClass::Other);
    }

    #[test]
    fn test_classify_without_nested_regions() {
        assert_eq!(classify_region("GC 5K->3K(8K), 0.1 secs"), RegionClass::Minor);
        assert_eq!(
            classify_region("Full GC 5000K->1000K(8000K), 0.5 secs"),
            RegionClass::Full
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let content = "Full GC [PSPermGen: 1K->1K(2K)] 5K->3K(8K), 0.1 secs";
        assert_eq!(classify_region(content), classify_region(content));
    }

    #[test]
    fn test_extract_minor() {
        let m = extract_measurement(
            "GC [PSYoungGen: 1000K->200K(2000K)] 5000K->3000K(8000K), 0.0123456 secs",
        )
        .unwrap();

        assert_eq!(m.pause_seconds, 0.0123456);
        assert_eq!(m.heap, HeapTriple::new(5000, 3000, 8000));
        assert_eq!(m.sub_regions.len(), 1);
        assert_eq!(m.sub_regions[0].name, "PSYoungGen");
        assert_eq!(m.sub_regions[0].kind, SubRegionKind::Other);
    }

    #[test]
    fn test_extract_full_with_perm_gen() {
        let m = extract_measurement(
            "Full GC [PSYoungGen: 100K->0K(2000K)] [ParOldGen: 4000K->2500K(6000K)] \
             4100K->2500K(8000K) [PSPermGen: 30000K->29000K(60000K)], 0.5432100 secs",
        )
        .unwrap();

        assert_eq!(m.pause_seconds, 0.54321);
        assert_eq!(m.heap, HeapTriple::new(4100, 2500, 8000));
        assert_eq!(m.sub_regions.len(), 3);
        let perm = m
            .sub_regions
            .iter()
            .find(|r| r.kind == SubRegionKind::PermGen)
            .unwrap();
        assert_eq!(perm.name, "PSPermGen");
        assert_eq!(perm.heap, HeapTriple::new(30000, 29000, 60000));
    }

    #[test]
    fn test_extract_missing_pause() {
        let err = extract_measurement("GC [PSYoungGen: 1K->0K(2K)] 5K->3K(8K)").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_extract_locale_decimal_rejected() {
        let err = extract_measurement("GC 5K->3K(8K), 0,0123 secs").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_extract_missing_heap() {
        let err = extract_measurement("GC [PSYoungGen: 1K->0K(2K)], 0.1 secs").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_extract_ambiguous_heap() {
        let err = extract_measurement("GC 5K->3K(8K) 6K->2K(8K), 0.1 secs").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_extract_capacity_exceeded() {
        let err = extract_measurement("GC 5K->9K(8K), 0.1 secs").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_perm_gen_capacity_exceeded() {
        let err =
            extract_measurement("Full GC 5K->3K(8K) [PSPermGen: 7K->7K(6K)], 0.1 secs").unwrap_err();
        assert!(matches!(err, ParseError::Measurement { .. }));
    }

    #[test]
    fn test_other_sub_region_without_triple_ignored() {
        let m = extract_measurement("GC [1 CMS-initial-mark] 5K->3K(8K), 0.1 secs").unwrap();
        assert!(m.sub_regions.is_empty());
    }

    #[test]
    fn test_nested_pause_fallback() {
        let m = extract_measurement("GC 5K->3K(8K) [Times: user=0.01 sys=0.00, real=0.02 secs]")
            .unwrap();
        assert_eq!(m.pause_seconds, 0.02);
    }

    #[test]
    fn test_sub_region_label() {
        assert_eq!(sub_region_label("PSPermGen: 1K->1K(2K)"), "PSPermGen");
        assert_eq!(sub_region_label("CMS Perm : 1K->1K(2K)"), "CMS Perm");
        assert_eq!(sub_region_label("weak refs processing, 0.1 secs"), "weak");
    }
}
