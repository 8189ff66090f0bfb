//! Next-steps advisor: short, ordered guidance lines per result.
//!
//! Test-specific rules match substrings of the raw uppercased name, not the
//! canonical key, so "Fasting Glucose" and "GLUCOSE" both trigger the
//! glucose guidance. Specific advice is prepended ahead of the generic
//! lines and the list is truncated afterwards, so when several rules fire
//! the specific advice pushes the generic lines out. That displacement is
//! intentional and part of the output contract.

use super::types::{ClassifiedLab, LabStatus};

/// Upper bound on guidance lines per result.
pub const MAX_STEPS: usize = 4;

/// Build the ordered guidance list for one classified result.
pub fn next_steps(lab: &ClassifiedLab) -> Vec<String> {
    let name = lab.name.trim().to_uppercase();

    if lab.status == LabStatus::InRange {
        return vec![
            "This result is within the expected range based on the reference range shown."
                .to_string(),
            "If you have symptoms or concerns, discuss them with a clinician even if labs look normal."
                .to_string(),
        ];
    }

    if !matches!(lab.status, LabStatus::High | LabStatus::Low) {
        return vec![
            "This result could not be compared to a reference range from the text provided."
                .to_string(),
            "If you have the full report, compare it to the reference range listed there or review it with a clinician."
                .to_string(),
        ];
    }

    let mut steps = vec![
        "Review this result in context with your other labs, symptoms, and medical history."
            .to_string(),
        "If you have a prior result, comparing trends over time can be more helpful than one number."
            .to_string(),
    ];

    if name.contains("GLUCOSE") {
        if lab.status == LabStatus::High {
            steps.insert(
                0,
                "If this was a fasting glucose, a repeat fasting test may help confirm the result."
                    .to_string(),
            );
            steps.insert(
                1,
                "If this was not fasting, ask whether a fasting re-check is appropriate.".to_string(),
            );
        } else {
            steps.insert(
                0,
                "If you felt shaky, sweaty, confused, or weak around the test time, note it and mention it to a clinician."
                    .to_string(),
            );
        }
    }

    // "A1C" also covers "HEMOGLOBIN A1C" and "HBA1C". No fasting mention.
    if name.contains("A1C") && lab.status == LabStatus::High {
        steps.insert(
            0,
            "A1C reflects average blood sugar over about 2-3 months; it's often reviewed together with glucose results."
                .to_string(),
        );
        steps.insert(
            1,
            "Ask about follow-up timing and what A1C target range applies to you personally."
                .to_string(),
        );
    }

    if name == "WBC" || name.contains("WHITE BLOOD") {
        steps.insert(
            0,
            "WBC can change with infection, inflammation, stress, or some medications, so context matters."
                .to_string(),
        );
        steps.push(
            "If you were sick recently or took steroids, mention that when reviewing the result."
                .to_string(),
        );
    }

    if name.contains("CREATININE") {
        steps.insert(
            0,
            "Creatinine can be influenced by hydration, muscle mass, and some medications; it's often reviewed with other kidney markers."
                .to_string(),
        );
        steps.push(
            "If your report includes eGFR or BUN, reviewing them together can give better kidney context."
                .to_string(),
        );
    }

    steps.truncate(MAX_STEPS);
    steps
}
