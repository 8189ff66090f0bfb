//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::analysis::LabKnowledge;
use crate::api::error::ApiError;
use crate::db;
use crate::extraction::OcrEngine;

/// Shared context for all API routes.
///
/// The knowledge base and OCR engine live for the process; database
/// connections are opened per request, SQLite handles the locking.
#[derive(Clone)]
pub struct ApiContext {
    pub db_path: Arc<PathBuf>,
    pub knowledge: Arc<LabKnowledge>,
    pub ocr: Arc<dyn OcrEngine>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, knowledge: Arc<LabKnowledge>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            db_path: Arc::new(db_path),
            knowledge,
            ocr,
        }
    }

    /// Open a connection to the scan history database.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        Ok(db::open_database(&self.db_path)?)
    }
}
