use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{DateOrder, MERCHANT_SCAN_LINES};
use crate::layout::LINE_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid extraction config: {0}")]
    Invalid(String),
}

/// Tunables for [`crate::Extractor`]. Missing keys fall back to defaults.
///
/// ```toml
/// line_threshold = 5.0
/// merchant_scan_lines = 3
/// date_order = "day_first"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Vertical distance (px) under which two words share a line.
    pub line_threshold: f32,
    /// Leading text lines searched for the merchant name.
    pub merchant_scan_lines: usize,
    /// Used only when interpreting the raw date into a calendar date.
    pub date_order: DateOrder,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            line_threshold: LINE_THRESHOLD,
            merchant_scan_lines: MERCHANT_SCAN_LINES,
            date_order: DateOrder::default(),
        }
    }
}

impl ExtractionConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: ExtractionConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_threshold.is_finite() || self.line_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "line_threshold must be a non-negative number, got {}",
                self.line_threshold
            )));
        }
        if self.merchant_scan_lines == 0 {
            return Err(ConfigError::Invalid("merchant_scan_lines must be at least 1".into()));
        }
        Ok(())
    }
}
