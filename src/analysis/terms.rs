//! Medical abbreviation detection and expansion.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Known abbreviations and their plain-English expansions.
static ABBREVIATIONS: &[(&str, &str)] = &[
    ("DX", "Diagnosis"),
    ("HTN", "Hypertension (high blood pressure)"),
    ("DM", "Diabetes mellitus (diabetes)"),
    ("HLD", "Hyperlipidemia (high cholesterol)"),
    ("BID", "Twice a day"),
    ("TID", "Three times a day"),
    ("QID", "Four times a day"),
    ("QD", "Once daily"),
    ("QHS", "Every night at bedtime"),
    ("PRN", "As needed"),
    ("PO", "By mouth"),
    ("IV", "Into a vein"),
    ("IM", "Into a muscle"),
    ("SOB", "Shortness of breath"),
    ("CP", "Chest pain"),
    ("WNL", "Within normal limits"),
    ("CBC", "Complete blood count (blood test)"),
    ("CMP", "Comprehensive metabolic panel (blood test)"),
    ("A1C", "Hemoglobin A1C (average blood sugar over ~3 months)"),
];

static TERM_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, _)| {
            // Word-boundary match so punctuation next to a term still hits
            // ("HTN," "Dx:") without matching inside longer words.
            let pattern = format!(r"\b{}\b", regex::escape(abbr));
            (*abbr, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Find known abbreviations in free text.
///
/// Matching is case-insensitive via uppercasing the input. The result is
/// deduplicated and sorted for stable output.
pub fn find_terms(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }

    let upper = text.to_uppercase();
    let mut found: Vec<&'static str> = TERM_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&upper))
        .map(|(abbr, _)| *abbr)
        .collect();

    found.sort_unstable();
    found.dedup();
    found
}

/// Map found abbreviations to their expansions, in sorted term order.
pub fn explain_terms<'a, I>(terms: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lookup: std::collections::HashMap<&str, &str> =
        ABBREVIATIONS.iter().copied().collect();
    terms
        .into_iter()
        .map(|t| {
            let expansion = lookup.get(t).copied().unwrap_or("Unknown term");
            (t.to_string(), expansion.to_string())
        })
        .collect()
}
