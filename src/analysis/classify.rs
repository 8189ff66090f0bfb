//! Classifier: turns pattern-match candidates into classified lab results.
//!
//! Status precedence is fixed: an explicit flag from the text always wins
//! over a computed range comparison. Classification is total: every field
//! has a defined default and nothing here returns an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::knowledge::LabKnowledge;
use super::patterns::match_line;
use super::scanner::scan_lines;
use super::types::{ClassifiedLab, LabCandidate, LabStatus, ReferenceRange};

/// Fallback explanation for tests missing from the knowledge base.
pub const GENERIC_EXPLANATION: &str = "Lab test: explanation not yet added.";

/// Panel assigned to tests with no panel mapping.
pub const DEFAULT_PANEL: &str = "Other";

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Uppercase, collapse whitespace, and resolve through the alias table.
/// Unresolved names pass through unchanged as their own key.
pub fn canonical_key(name: &str, knowledge: &LabKnowledge) -> String {
    let normalized = WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_uppercase();
    match knowledge.resolve_alias(&normalized) {
        Some(key) => key.to_string(),
        None => normalized,
    }
}

/// Parse a reference-range string into numeric bounds.
///
/// Accepts "4.0-10.5", "4.0 - 10.5", "70-99". Extraction takes the first
/// two decimals separated by a hyphen; malformed text yields `None`.
pub fn parse_range(text: &str) -> Option<ReferenceRange> {
    let caps = RANGE_RE.captures(text)?;
    let low: f64 = caps.get(1)?.as_str().parse().ok()?;
    let high: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(ReferenceRange { low, high })
}

/// Map an explicit flag token to a status. Anything unrecognized is Unknown.
fn flag_to_status(flag: &str) -> LabStatus {
    match flag.trim().to_uppercase().as_str() {
        "H" | "HIGH" => LabStatus::High,
        "L" | "LOW" => LabStatus::Low,
        "A" | "ABN" | "ABNORMAL" => LabStatus::Abnormal,
        "C" | "CRITICAL" => LabStatus::Critical,
        _ => LabStatus::Unknown,
    }
}

/// Strict-inequality comparison: a value exactly at a bound is in range.
fn status_from_range(value: f64, range: ReferenceRange) -> LabStatus {
    if value < range.low {
        LabStatus::Low
    } else if value > range.high {
        LabStatus::High
    } else {
        LabStatus::InRange
    }
}

/// Render a range bound the way the default-range table displays it:
/// integral bounds keep one decimal ("4.0"), fractional bounds print as-is.
fn format_bound(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Classify one candidate against the knowledge base.
pub fn classify(candidate: LabCandidate, knowledge: &LabKnowledge) -> ClassifiedLab {
    let key = canonical_key(&candidate.name, knowledge);

    // Range from the text, else the per-key default with a synthesized
    // display string.
    let text_range = candidate
        .reference_range_text
        .as_deref()
        .and_then(parse_range);

    let (range, reference_range) = match (text_range, &candidate.reference_range_text) {
        (Some(range), Some(text)) => (Some(range), Some(text.clone())),
        _ => match knowledge.default_range(&key) {
            Some(range) => (
                Some(range),
                Some(format!(
                    "{}-{}",
                    format_bound(range.low),
                    format_bound(range.high)
                )),
            ),
            None => (None, candidate.reference_range_text.clone()),
        },
    };

    // Explicit flag wins over the computed comparison.
    let status = match &candidate.flag {
        Some(flag) => flag_to_status(flag),
        None => match range {
            Some(range) => status_from_range(candidate.value, range),
            None => LabStatus::Unknown,
        },
    };

    let panel = knowledge
        .panel(&key)
        .unwrap_or(DEFAULT_PANEL)
        .to_string();

    let explanation = knowledge
        .explanation(&key)
        // Historical lookup quirk: retry with "HEMOGLOBIN " folded to "HGB ".
        .or_else(|| knowledge.explanation(&key.replace("HEMOGLOBIN ", "HGB ")))
        .unwrap_or(GENERIC_EXPLANATION)
        .to_string();

    ClassifiedLab {
        name: candidate.name,
        value: candidate.value,
        units: candidate.units,
        flag: candidate.flag,
        reference_range,
        status,
        panel,
        explanation,
        range,
    }
}

/// Heuristic lab extraction over raw text: scan lines, match patterns,
/// classify, then deduplicate on the (name, value, flag, range-as-written)
/// signature, keeping the first occurrence in line order.
///
/// The signature uses the range text as written, not the display string, so
/// two lines that differ only in whether they spell out a default range stay
/// distinct.
pub fn find_labs(text: &str, knowledge: &LabKnowledge) -> Vec<ClassifiedLab> {
    let mut results = Vec::new();
    let mut seen: HashSet<(String, u64, Option<String>, Option<String>)> = HashSet::new();

    for line in scan_lines(text) {
        let Some(candidate) = match_line(line) else {
            continue;
        };

        let signature = (
            candidate.name.clone(),
            candidate.value.to_bits(),
            candidate.flag.clone(),
            candidate.reference_range_text.clone(),
        );
        if !seen.insert(signature) {
            continue;
        }

        results.push(classify(candidate, knowledge));
    }

    results
}
