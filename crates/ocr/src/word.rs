use serde::{Deserialize, Serialize};
use tally_core::BoundingBox;
use tracing::trace;

/// One recognized token, as consumed by every extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    /// Recognition confidence reported by the engine (0–100).
    pub confidence: f32,
    pub bounds: BoundingBox,
}

impl Word {
    pub fn new(text: impl Into<String>, confidence: f32, bounds: BoundingBox) -> Self {
        Self { text: text.into(), confidence, bounds }
    }
}

/// A word record in the engine's native shape (`bbox` rather than `bounds`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineWord {
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl From<EngineWord> for Word {
    fn from(w: EngineWord) -> Self {
        Word { text: w.text, confidence: w.confidence, bounds: w.bbox }
    }
}

/// Normalize engine words into [`Word`]s, keeping recognition order.
///
/// An engine result without a word list yields no words rather than an error.
pub fn adapt_words(words: Option<Vec<EngineWord>>) -> Vec<Word> {
    words.unwrap_or_default().into_iter().map(Word::from).collect()
}

const TSV_WORD_LEVEL: u32 = 5;
const TSV_COLUMNS: usize = 12;

/// Parse Tesseract TSV output into word records.
///
/// Columns: `level page_num block_num par_num line_num word_num left top
/// width height conf text`. Only word-level rows with non-blank text are kept.
pub fn engine_words_from_tsv(tsv: &str) -> Vec<EngineWord> {
    tsv.lines()
        .enumerate()
        .filter_map(|(idx, row)| {
            let word = parse_tsv_row(row);
            if word.is_none() {
                trace!(row = idx, "skipping tsv row");
            }
            word
        })
        .collect()
}

fn parse_tsv_row(row: &str) -> Option<EngineWord> {
    let cols: Vec<&str> = row.split('\t').collect();
    if cols.len() < TSV_COLUMNS {
        return None;
    }
    if cols[0].trim().parse::<u32>().ok()? != TSV_WORD_LEVEL {
        return None;
    }
    let text = cols[11].trim();
    if text.is_empty() {
        return None;
    }
    let num = |i: usize| cols[i].trim().parse::<f32>().ok();
    let bbox = BoundingBox::from_origin_size(num(6)?, num(7)?, num(8)?, num(9)?);
    Some(EngineWord { text: text.to_string(), confidence: num(10)?, bbox })
}
