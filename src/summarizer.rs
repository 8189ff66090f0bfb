//! Placeholder document summarizer.
//!
//! Returns a structured payload built from the first lines of the input.
//! The bundled prompt rules are loaded to validate the wiring but no
//! language model is called.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config;

const PROMPT_RULES: &str = include_str!("../resources/prompts/ai_prompt.md");

const SUMMARY_LINE_CAP: usize = 8;
const SUMMARY_CHAR_CAP: usize = 700;
const PROMPT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<Value>,
    pub meta: Value,
}

/// Summarize raw document text.
///
/// Empty input is reported in-band (`ok: false`), not as an error; the
/// endpoint still answers 200 with the structured payload.
pub fn summarize_text(text: &str) -> SummaryResponse {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return SummaryResponse {
            ok: false,
            error: Some("No text provided.".to_string()),
            summary: String::new(),
            next_steps: None,
            safety: None,
            meta: json!({
                "reading_level": config::SUMMARY_READING_LEVEL,
                "allow_diagnosis": config::ALLOW_DIAGNOSIS,
                "allow_treatment_advice": config::ALLOW_TREATMENT_ADVICE,
                "prompt_loaded": true,
            }),
        };
    }

    let first_lines: Vec<&str> = cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(SUMMARY_LINE_CAP)
        .collect();
    let mut summary = first_lines.join(" ");
    if summary.chars().count() > SUMMARY_CHAR_CAP {
        summary = summary
            .chars()
            .take(SUMMARY_CHAR_CAP)
            .collect::<String>()
            .trim_end()
            .to_string()
            + "...";
    }

    let prompt_preview: String = PROMPT_RULES
        .trim()
        .chars()
        .take(PROMPT_PREVIEW_CHARS)
        .collect();

    SummaryResponse {
        ok: true,
        error: None,
        summary,
        next_steps: Some(vec![
            "Review your original document for accuracy.".to_string(),
            "Write down any questions you want to ask your clinician.".to_string(),
        ]),
        safety: Some(json!({
            "diagnosis_allowed": config::ALLOW_DIAGNOSIS,
            "treatment_advice_allowed": config::ALLOW_TREATMENT_ADVICE,
            "note": "This app explains text from your document and does not provide medical advice.",
        })),
        meta: json!({
            "reading_level": config::SUMMARY_READING_LEVEL,
            "prompt_loaded": true,
            "prompt_preview": prompt_preview,
        }),
    }
}
