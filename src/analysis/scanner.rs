//! Line scanner: the first pipeline stage.

/// Split raw text into trimmed, non-empty lines in source order.
///
/// Empty input yields an empty iterator, not an error. Source order is
/// preserved and becomes the stable dedup/result order downstream.
pub fn scan_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
