// Compiled once per process and shared read-only by every extractor.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod config;
pub mod extract;
pub mod fields;
pub mod layout;
pub mod line_items;
pub mod pipeline;
pub mod recognizer;
pub mod types;
pub mod word;

pub use config::{ConfigError, ExtractionConfig};
pub use extract::{ExtractionError, Extractor};
pub use fields::{extract_date, extract_merchant, extract_total, interpret_date, DateOrder};
pub use layout::{cluster_lines, Line, LINE_THRESHOLD};
pub use line_items::{extract_line_items, parse_line, parse_lines, LineItemError};
pub use pipeline::{ExtractionOutcome, PipelineError, ReceiptPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, OcrPage};
pub use types::{LineItem, OcrInput, ReceiptSummary, StructuredReceipt, SummaryLine};
pub use word::{adapt_words, engine_words_from_tsv, EngineWord, Word};
pub use tally_core::{BoundingBox, Money};
