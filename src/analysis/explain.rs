//! Explainer: renders sentences, grades severity, and assembles the report.

use super::advice::next_steps;
use super::severity::grade;
use super::types::{ClassifiedLab, ExplainReport, ExplainedLab, LabStatus};

/// Fixed disclaimer attached to every explanation payload.
pub const SAFETY_NOTE: &str = "Note: This is informational only and not medical advice. \
     If you have symptoms or concerns, or if a result is very high or low, contact a clinician.";

const EMPTY_SUMMARY: &str = "No lab results were detected in the text.";

fn status_phrase(status: LabStatus) -> &'static str {
    match status {
        LabStatus::High => "is higher than expected",
        LabStatus::Low => "is lower than expected",
        LabStatus::InRange => "is within the expected range",
        _ => "could not be compared to a reference range",
    }
}

/// Trailing-zero-trimmed rendering: 1.10 prints as "1.1", 102.0 as "102".
fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Render the one-line statement for a result.
pub fn lab_sentence(lab: &ClassifiedLab) -> String {
    let units = match &lab.units {
        Some(u) => format!(" {u}"),
        None => String::new(),
    };
    let reference = lab.reference_range.as_deref().unwrap_or("not provided");
    format!(
        "{} is {}{}, which {} (ref: {}).",
        lab.name,
        format_value(lab.value),
        units,
        status_phrase(lab.status),
        reference
    )
}

/// One-sentence count breakdown across all results.
///
/// Abnormal and critical statuses have no bucket of their own and fall into
/// the unknown count.
pub fn counts_summary(results: &[ClassifiedLab]) -> String {
    if results.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let mut high = 0;
    let mut low = 0;
    let mut in_range = 0;
    let mut unknown = 0;
    for lab in results {
        match lab.status {
            LabStatus::High => high += 1,
            LabStatus::Low => low += 1,
            LabStatus::InRange => in_range += 1,
            _ => unknown += 1,
        }
    }

    format!("Summary: {high} high, {low} low, {in_range} in range, {unknown} unknown.")
}

/// Build the full explanation payload for a set of classified results.
pub fn explain(results: Vec<ClassifiedLab>) -> ExplainReport {
    let overall_summary = counts_summary(&results);
    let count = results.len();

    let items = results
        .into_iter()
        .map(|lab| {
            let severity = grade(&lab);
            let sentence = lab_sentence(&lab);
            let steps = next_steps(&lab);
            ExplainedLab {
                name: lab.name,
                value: lab.value,
                units: lab.units,
                panel: lab.panel,
                status: lab.status,
                severity,
                reference_range: lab.reference_range,
                sentence,
                what_it_is: lab.explanation,
                next_steps: steps,
            }
        })
        .collect();

    ExplainReport {
        count,
        overall_summary,
        items,
        note: SAFETY_NOTE.to_string(),
    }
}
