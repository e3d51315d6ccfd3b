use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::word::EngineWord;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available, build with `tesseract` feature")]
    NotAvailable,
}

/// Everything one recognition pass over an image produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    pub text: String,
    /// Mean confidence for the whole page (0–100).
    pub confidence: f32,
    /// Engines may omit the word list entirely.
    #[serde(default)]
    pub words: Option<Vec<EngineWord>>,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return the recognized page.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<OcrPage, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a preset page, for exercising extraction without an engine installed.
pub struct MockRecognizer {
    pub page: OcrPage,
}

impl MockRecognizer {
    pub fn new(page: OcrPage) -> Self {
        Self { page }
    }

    /// A page with text only and no word list.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(OcrPage { text: text.into(), confidence: 100.0, words: None })
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<OcrPage, OcrError> {
        Ok(self.page.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError, OcrPage};
    use crate::word::engine_words_from_tsv;
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<OcrPage, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            let tsv = lt.get_tsv_text(0).map_err(|e| OcrError::Engine(e.to_string()))?;
            let confidence = lt.mean_text_conf() as f32;
            Ok(OcrPage { text, confidence, words: Some(engine_words_from_tsv(&tsv)) })
        }
    }
}
