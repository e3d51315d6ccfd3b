use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, ExtractionConfig};
use crate::fields::{extract_date, extract_merchant_within, extract_total, interpret_date};
use crate::line_items::extract_line_items;
use crate::types::{OcrInput, StructuredReceipt};
use crate::word::Word;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    /// The OCR stage finished without producing any text.
    #[error("OCR produced no text")]
    NoText,
}

/// Builds a [`StructuredReceipt`] from one OCR pass.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract every field from the OCR text and line items from its words.
    ///
    /// Fields that cannot be found are left empty; only text-less input fails.
    pub fn extract(&self, text: &str, words: Vec<Word>) -> Result<StructuredReceipt, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        let date = extract_date(text);
        let total = extract_total(text);
        let merchant = extract_merchant_within(text, self.config.merchant_scan_lines);
        let line_items = extract_line_items(&words, self.config.line_threshold);

        debug!(
            date = date.as_deref().unwrap_or(""),
            total = total.as_deref().unwrap_or(""),
            merchant = merchant.as_deref().unwrap_or(""),
            words = words.len(),
            line_items = line_items.len(),
            "extracted receipt"
        );

        Ok(StructuredReceipt { date, total, merchant, line_items, words })
    }

    pub fn extract_input(&self, input: OcrInput) -> Result<StructuredReceipt, ExtractionError> {
        self.extract(&input.text, input.words)
    }

    /// Calendar date of an extracted receipt, read with the configured order.
    pub fn receipt_date(&self, receipt: &StructuredReceipt) -> Option<NaiveDate> {
        interpret_date(receipt.date.as_deref()?, self.config.date_order)
    }
}
