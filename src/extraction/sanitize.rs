//! Post-OCR text cleanup.

use std::sync::LazyLock;

use regex::Regex;

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize OCR output before analysis: CR and CRLF become LF, runs of
/// spaces and tabs collapse to one space, runs of three or more newlines
/// collapse to two, and the whole text is trimmed.
///
/// Line structure is preserved; the line scanner depends on it.
pub fn basic_cleanup(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}
