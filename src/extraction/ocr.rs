//! OCR engines behind a common trait.
//!
//! `BundledTesseract` is only compiled with the `ocr` feature; builds
//! without it fall back to `DisabledOcr`, which reports a clear error
//! instead of failing at startup.

use std::sync::Arc;

use super::ExtractionError;

/// Turns image bytes into raw text.
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Bundled Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: std::path::PathBuf,
    default_lang: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory. English traineddata must be
    /// present; the language can be widened with [`Self::with_languages`].
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            default_lang: crate::config::OCR_LANGUAGE.to_string(),
        })
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.default_lang = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ExtractionError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(&self.default_lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        // PSM 6: assume a uniform block of text, which fits lab report
        // layouts better than full page segmentation.
        let tess = tess
            .set_variable("tessedit_pageseg_mode", "6")
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        Ok(text)
    }
}

/// Engine used when OCR support is compiled out or unavailable.
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrDisabled)
    }
}

/// Fixed-output engine for tests.
pub struct MockOcrEngine {
    text: Option<String>,
}

impl MockOcrEngine {
    /// Engine that returns the given text for any image.
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    /// Engine that fails every call.
    pub fn failing() -> Self {
        Self { text: None }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, ExtractionError> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(ExtractionError::OcrProcessing("mock failure".into())),
        }
    }
}

/// Build the engine for the current build configuration.
#[cfg(feature = "ocr")]
pub fn default_engine() -> Arc<dyn OcrEngine> {
    match BundledTesseract::new(&crate::config::tessdata_dir()) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::warn!("OCR engine unavailable, image scanning disabled: {e}");
            Arc::new(DisabledOcr)
        }
    }
}

/// Build the engine for the current build configuration.
#[cfg(not(feature = "ocr"))]
pub fn default_engine() -> Arc<dyn OcrEngine> {
    tracing::info!("Built without the ocr feature, image scanning disabled");
    Arc::new(DisabledOcr)
}
