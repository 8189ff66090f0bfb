//! Value types for the lab analysis pipeline.
//!
//! Each stage produces a new immutable value: raw line → `LabCandidate` →
//! `ClassifiedLab` → `ExplainedLab`. Nothing is mutated after emission.

use serde::Serialize;

/// Clinical status of a single lab result.
///
/// `Abnormal` and `Critical` are only reachable through an explicit flag in
/// the source text; range comparison produces `High`/`Low`/`InRange` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabStatus {
    High,
    Low,
    InRange,
    Abnormal,
    Critical,
    Unknown,
}

impl LabStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::InRange => "in_range",
            Self::Abnormal => "abnormal",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

/// Magnitude tier for an out-of-range result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Unknown => "unknown",
        }
    }
}

/// Parsed numeric reference interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

/// Result of a successful pattern match on one line.
///
/// `name` and `value` are always present; a line without a parseable numeric
/// value never produces a candidate. `flag` and `reference_range_text` are
/// kept verbatim as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct LabCandidate {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
    pub flag: Option<String>,
    pub reference_range_text: Option<String>,
}

/// A candidate enriched with status, panel, and explanation.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedLab {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
    pub flag: Option<String>,
    /// Display form of the reference range ("lo-hi"), either as written in
    /// the text or synthesized from a default range.
    pub reference_range: Option<String>,
    pub status: LabStatus,
    pub panel: String,
    pub explanation: String,
    /// Parsed numeric bounds backing `reference_range`. Internal to the
    /// pipeline; the JSON payload carries the display string only.
    #[serde(skip)]
    pub range: Option<ReferenceRange>,
}

/// A classified result plus severity, guidance, and a rendered sentence.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedLab {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
    pub panel: String,
    pub status: LabStatus,
    pub severity: Severity,
    pub reference_range: Option<String>,
    pub sentence: String,
    pub what_it_is: String,
    pub next_steps: Vec<String>,
}

/// Full explanation payload for one analyzed text.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainReport {
    pub count: usize,
    pub overall_summary: String,
    pub items: Vec<ExplainedLab>,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&LabStatus::InRange).unwrap(),
            "\"in_range\""
        );
        assert_eq!(serde_json::to_string(&LabStatus::High).unwrap(), "\"high\"");
    }

    #[test]
    fn status_as_str_round_trip() {
        for (status, s) in [
            (LabStatus::High, "high"),
            (LabStatus::Low, "low"),
            (LabStatus::InRange, "in_range"),
            (LabStatus::Abnormal, "abnormal"),
            (LabStatus::Critical, "critical"),
            (LabStatus::Unknown, "unknown"),
        ] {
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn severity_as_str_matches_serde() {
        for severity in [
            Severity::None,
            Severity::Mild,
            Severity::Moderate,
            Severity::Severe,
            Severity::Unknown,
        ] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
    }

    #[test]
    fn classified_lab_json_omits_numeric_range() {
        let lab = ClassifiedLab {
            name: "WBC".into(),
            value: 8.2,
            units: None,
            flag: None,
            reference_range: Some("4.0-10.5".into()),
            status: LabStatus::InRange,
            panel: "CBC".into(),
            explanation: "WBC (white blood cells): cells involved in fighting infection and inflammation.".into(),
            range: Some(ReferenceRange { low: 4.0, high: 10.5 }),
        };
        let json = serde_json::to_value(&lab).unwrap();
        assert_eq!(json["reference_range"], "4.0-10.5");
        assert!(json.get("range").is_none());
    }
}
