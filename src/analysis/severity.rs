//! Severity grading for out-of-range results.

use super::types::{ClassifiedLab, LabStatus, ReferenceRange, Severity};

/// Signed deviation at or below which a result is graded mild.
const MILD_BREAKPOINT: f64 = 0.10;
/// Signed deviation at or below which a result is graded moderate.
const MODERATE_BREAKPOINT: f64 = 0.25;

/// Grade how far a high or low result sits outside its reference range.
///
/// The deviation is signed and measured against the bound that was crossed:
/// `(value - high) / high` for a high result, `(low - value) / low` for a
/// low one, each only defined when that bound is positive. In-range results
/// grade none; statuses without a usable range grade unknown.
///
/// The 0.10 and 0.25 breakpoints are a product contract; both are inclusive
/// on the lower tier.
pub fn grade(lab: &ClassifiedLab) -> Severity {
    match lab.status {
        LabStatus::InRange => Severity::None,
        LabStatus::High | LabStatus::Low => match lab.range {
            Some(range) => grade_deviation(lab.value, lab.status, range),
            None => Severity::Unknown,
        },
        _ => Severity::Unknown,
    }
}

fn grade_deviation(value: f64, status: LabStatus, range: ReferenceRange) -> Severity {
    let pct = match status {
        LabStatus::High if range.high > 0.0 => (value - range.high) / range.high,
        LabStatus::Low if range.low > 0.0 => (range.low - value) / range.low,
        _ => return Severity::Unknown,
    };
    if pct <= MILD_BREAKPOINT {
        Severity::Mild
    } else if pct <= MODERATE_BREAKPOINT {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}
