use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::extract::{ExtractionError, Extractor};
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{OcrInput, StructuredReceipt};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// The result of a single receipt processing run.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Mean page confidence reported by the OCR engine (0–100).
    pub page_confidence: f32,
    pub receipt: StructuredReceipt,
}

/// Orchestrates: recognize → adapt words → extract.
///
/// The pipeline owns its recognizer for as long as it lives, so any engine
/// state is acquired when the pipeline is built and released when it is
/// dropped. Nothing is shared between pipelines.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
    extractor: Extractor,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R, extractor: Extractor) -> Self {
        Self { recognizer, extractor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Process a file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ExtractionOutcome, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        info!(path = %path.display(), bytes = bytes.len(), "processing receipt");
        self.process_image(&bytes)
    }

    /// Process raw image bytes (from camera capture or file read).
    pub fn process_image(&self, image_bytes: &[u8]) -> Result<ExtractionOutcome, PipelineError> {
        // 1. Run OCR.
        let page = self.recognizer.recognize(image_bytes)?;
        let page_confidence = page.confidence;
        debug!(confidence = page_confidence, chars = page.text.len(), "recognized page");

        // 2. Extract structured fields and line items.
        let receipt = self.extractor.extract_input(OcrInput::from(page))?;

        Ok(ExtractionOutcome { page_confidence, receipt })
    }

    /// Process several images with the same recognizer. Each image succeeds
    /// or fails on its own.
    pub fn process_batch<I, B>(&self, images: I) -> Vec<Result<ExtractionOutcome, PipelineError>>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        images
            .into_iter()
            .map(|image| self.process_image(image.as_ref()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
