//! Pattern matcher: ordered regex heuristics for lab result lines.
//!
//! Each line is tried against a fixed, ordered list of full-line-anchored
//! patterns; the first pattern that matches the whole line wins. Lines that
//! match nothing are silently skipped (headers, separators, free text).
//!
//! Ordering matters: the bare-flag pattern must run before the general ones,
//! otherwise a flag token like `H` would be mis-parsed as a unit string or
//! swallowed by the trailing reference-range group.

use std::sync::LazyLock;

use regex::Regex;

use super::types::LabCandidate;

/// Ordered match patterns, most specific first:
/// 1. `NAME <value> <FLAG> [units] [ref]`   e.g. `GLUCOSE 102 H 70-99`
/// 2. `NAME <value> [units] (<flag>) [ref]` e.g. `A1C 6.1 (H)`
/// 3. `NAME <value> [units] [ref]`          e.g. `WBC 8.2 4.0-10.5`
static LAB_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Bare flag directly after the value. Longer flag words first so the
        // alternation does not stop at `H` inside `HIGH`.
        Regex::new(
            r"(?i)^(?P<name>[A-Za-z][A-Za-z0-9\s/%-]*?)[:\s]+(?P<value>-?\d+(?:\.\d+)?)\s+(?P<flag>HIGH|LOW|ABNORMAL|ABN|CRITICAL|H|L|A|C)\b\s*(?P<units>[A-Za-z%/.\s-]{0,12}?)\s*(?:\(?\s*(?P<ref>\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?)\s*\)?)?\s*$",
        )
        .unwrap(),
        // Parenthesized flag after the value and optional units.
        Regex::new(
            r"(?i)^(?P<name>[A-Za-z][A-Za-z0-9\s/%-]*?)[:\s]+(?P<value>-?\d+(?:\.\d+)?)\s*(?P<units>[A-Za-z%/.\s-]{0,12}?)\s*\(\s*(?P<flag>[A-Za-z]+)\s*\)\s*(?:\(?\s*(?P<ref>\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?)\s*\)?)?\s*$",
        )
        .unwrap(),
        // No flag: value with optional units and optional reference range.
        Regex::new(
            r"(?i)^(?P<name>[A-Za-z][A-Za-z0-9\s/%-]*?)[:\s]+(?P<value>-?\d+(?:\.\d+)?)\s*(?P<units>[A-Za-z%/.\s-]{0,12}?)\s*(?:\(?\s*(?P<ref>\d+(?:\.\d+)?\s*-\s*\d+(?:\.\d+)?)\s*\)?)?\s*$",
        )
        .unwrap(),
    ]
});

/// Try each pattern in order against a single trimmed line.
///
/// Returns the candidate from the first full match, or `None` when the line
/// does not look like a lab result.
pub fn match_line(line: &str) -> Option<LabCandidate> {
    for pattern in LAB_PATTERNS.iter() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };

        let raw_name = caps.name("name").map(|m| m.as_str().trim()).unwrap_or("");
        if raw_name.is_empty() {
            continue;
        }

        // A candidate without a numeric value is never constructed; the
        // regex guarantees the capture parses, but stay total anyway.
        let value: f64 = match caps.name("value").and_then(|m| m.as_str().parse().ok()) {
            Some(v) => v,
            None => continue,
        };

        let name = raw_name.split_whitespace().collect::<Vec<_>>().join(" ");
        let units = caps
            .name("units")
            .map(|m| m.as_str().trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        let flag = caps
            .name("flag")
            .map(|m| m.as_str().trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let reference_range_text = caps
            .name("ref")
            .map(|m| m.as_str().trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        return Some(LabCandidate {
            name,
            value,
            units,
            flag,
            reference_range_text,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_flag_with_range() {
        let c = match_line("GLUCOSE 102 H 70-99").unwrap();
        assert_eq!(c.name, "GLUCOSE");
        assert_eq!(c.value, 102.0);
        assert_eq!(c.flag.as_deref(), Some("H"));
        assert_eq!(c.reference_range_text.as_deref(), Some("70-99"));
        assert_eq!(c.units, None);
    }

    #[test]
    fn parenthesized_flag_without_range() {
        let c = match_line("A1C 6.1 (H)").unwrap();
        assert_eq!(c.name, "A1C");
        assert_eq!(c.value, 6.1);
        assert_eq!(c.flag.as_deref(), Some("H"));
        assert_eq!(c.reference_range_text, None);
    }

    #[test]
    fn plain_value_with_range() {
        let c = match_line("WBC 8.2 4.0-10.5").unwrap();
        assert_eq!(c.name, "WBC");
        assert_eq!(c.value, 8.2);
        assert_eq!(c.flag, None);
        assert_eq!(c.reference_range_text.as_deref(), Some("4.0-10.5"));
    }

    #[test]
    fn colon_separator_and_parenthesized_range() {
        let c = match_line("Creatinine: 1.10 (0.70-1.30)").unwrap();
        assert_eq!(c.name, "Creatinine");
        assert_eq!(c.value, 1.10);
        assert_eq!(c.flag, None);
        assert_eq!(c.reference_range_text.as_deref(), Some("0.70-1.30"));
    }

    #[test]
    fn units_are_captured() {
        let c = match_line("GLUCOSE 102 mg/dL 70-99").unwrap();
        assert_eq!(c.units.as_deref(), Some("mg/dL"));
        assert_eq!(c.reference_range_text.as_deref(), Some("70-99"));
    }

    #[test]
    fn word_flag_not_split_into_flag_plus_units() {
        let c = match_line("GLUCOSE 62 LOW").unwrap();
        assert_eq!(c.flag.as_deref(), Some("LOW"));
        assert_eq!(c.units, None);
    }

    #[test]
    fn multi_word_name() {
        let c = match_line("TOTAL PROTEIN 6.5 6.0-8.3").unwrap();
        assert_eq!(c.name, "TOTAL PROTEIN");
        assert_eq!(c.value, 6.5);
    }

    #[test]
    fn name_whitespace_is_normalized() {
        let c = match_line("TOTAL   PROTEIN 6.5").unwrap();
        assert_eq!(c.name, "TOTAL PROTEIN");
    }

    #[test]
    fn flag_pattern_wins_over_plain_pattern() {
        // Without ordering, `H` would land in the units capture.
        let c = match_line("HGB 11.2 L 12.0-17.5").unwrap();
        assert_eq!(c.flag.as_deref(), Some("L"));
        assert_eq!(c.units, None);
    }

    #[test]
    fn free_text_is_skipped() {
        assert!(match_line("RESULTS ARE LISTED BELOW").is_none());
        assert!(match_line("Patient Name: Jane Doe").is_none());
        assert!(match_line("---").is_none());
    }

    #[test]
    fn value_is_required() {
        assert!(match_line("GLUCOSE pending").is_none());
        assert!(match_line("GLUCOSE").is_none());
    }

    #[test]
    fn negative_value_accepted() {
        let c = match_line("BASE EXCESS -2.5").unwrap();
        assert_eq!(c.value, -2.5);
    }
}
