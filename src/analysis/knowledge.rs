//! Static lab knowledge base: explanations, aliases, panels, default ranges.
//!
//! Loaded once at startup from the bundled `lab_reference.json` and shared
//! read-only across all requests. Many raw test names map to one canonical
//! key; the mapping is fixed at build time, not learned.

use std::collections::HashMap;

use serde::Deserialize;

use super::types::ReferenceRange;

const BUNDLED_REFERENCE: &str = include_str!("../../resources/lab_reference.json");

#[derive(Debug, Deserialize)]
struct ExplanationEntry {
    key: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct AliasEntry {
    name: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct PanelEntry {
    key: String,
    panel: String,
}

#[derive(Debug, Deserialize)]
struct DefaultRangeEntry {
    key: String,
    low: f64,
    high: f64,
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    explanations: Vec<ExplanationEntry>,
    aliases: Vec<AliasEntry>,
    panels: Vec<PanelEntry>,
    default_ranges: Vec<DefaultRangeEntry>,
}

/// Loaded lab reference data. Read-only after construction.
pub struct LabKnowledge {
    explanations: HashMap<String, String>,
    aliases: HashMap<String, String>,
    panels: HashMap<String, String>,
    default_ranges: HashMap<String, ReferenceRange>,
}

impl LabKnowledge {
    /// Parse the bundled reference file.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        let file: ReferenceFile = serde_json::from_str(BUNDLED_REFERENCE)?;

        let explanations = file
            .explanations
            .into_iter()
            .map(|e| (e.key, e.text))
            .collect();
        let aliases = file.aliases.into_iter().map(|a| (a.name, a.key)).collect();
        let panels = file.panels.into_iter().map(|p| (p.key, p.panel)).collect();
        let default_ranges = file
            .default_ranges
            .into_iter()
            .map(|r| (r.key, ReferenceRange { low: r.low, high: r.high }))
            .collect();

        Ok(Self {
            explanations,
            aliases,
            panels,
            default_ranges,
        })
    }

    /// Resolve a normalized raw name through the alias table.
    pub fn resolve_alias(&self, normalized: &str) -> Option<&str> {
        self.aliases.get(normalized).map(String::as_str)
    }

    /// Plain-language explanation for a canonical key.
    pub fn explanation(&self, key: &str) -> Option<&str> {
        self.explanations.get(key).map(String::as_str)
    }

    /// Panel grouping for a canonical key.
    pub fn panel(&self, key: &str) -> Option<&str> {
        self.panels.get(key).map(String::as_str)
    }

    /// Default reference range for a canonical key.
    pub fn default_range(&self, key: &str) -> Option<ReferenceRange> {
        self.default_ranges.get(key).copied()
    }
}
