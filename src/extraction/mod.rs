//! Text extraction collaborators: OCR engine plus post-OCR cleanup.
//!
//! The analysis core treats extracted text as ordinary input; everything
//! here exists to turn an uploaded image into that text.

pub mod ocr;
pub mod sanitize;

pub use ocr::{default_engine, MockOcrEngine, OcrEngine};
pub use sanitize::basic_cleanup;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("OCR engine initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Tesseract language data not found at {0}")]
    TessdataNotFound(std::path::PathBuf),

    #[error("OCR support is not available in this build")]
    OcrDisabled,
}
