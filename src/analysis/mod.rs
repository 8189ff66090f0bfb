//! Lab text analysis pipeline.
//!
//! Four composed stages, each a pure function over immutable inputs:
//! scanner (lines) → patterns (candidates) → classify (status, panel,
//! explanation, dedup) → explain (severity, guidance, sentences). The
//! only shared state is the read-only [`knowledge::LabKnowledge`] table
//! loaded once at startup.

pub mod advice;
pub mod classify;
pub mod explain;
pub mod knowledge;
pub mod patterns;
pub mod scanner;
pub mod severity;
pub mod terms;
pub mod types;

pub use classify::find_labs;
pub use explain::explain;
pub use knowledge::LabKnowledge;
pub use terms::{explain_terms, find_terms};
pub use types::{ClassifiedLab, ExplainReport, ExplainedLab, LabStatus, Severity};
