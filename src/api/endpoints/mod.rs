//! API endpoint handlers.
//!
//! One module per feature area. Handlers stay thin and delegate to the
//! analysis pipeline, the summarizer, and the scan repository.

pub mod health;
pub mod labs;
pub mod scans;
pub mod summarize;
