use serde::{Deserialize, Serialize};
use tally_core::{BoundingBox, Money};

use crate::recognizer::OcrPage;
use crate::word::{adapt_words, Word};

/// One purchased entry parsed from a receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Text left of the price token; may be empty.
    pub description: String,
    pub amount: Money,
    /// Envelope of every word on the source line.
    pub bounds: BoundingBox,
}

/// A complete OCR pass: the text blob plus its positioned words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrInput {
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl From<OcrPage> for OcrInput {
    fn from(page: OcrPage) -> Self {
        OcrInput { text: page.text, words: adapt_words(page.words) }
    }
}

/// The structured record produced by one extraction.
///
/// Absent fields are `None` here and an empty string on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredReceipt {
    #[serde(default, with = "blank")]
    pub date: Option<String>,
    /// `$`-prefixed amount as it appeared after the total keyword.
    #[serde(default, with = "blank")]
    pub total: Option<String>,
    #[serde(default, with = "blank")]
    pub merchant: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Every recognized word, passed through for overlay rendering.
    #[serde(default)]
    pub words: Vec<Word>,
}

impl StructuredReceipt {
    /// Sum of all line item amounts.
    pub fn items_total(&self) -> Money {
        self.line_items.iter().map(|i| i.amount).sum()
    }

    /// Display-ready rendering of the record.
    pub fn summary(&self) -> ReceiptSummary {
        ReceiptSummary {
            date: self.date.clone().unwrap_or_default(),
            total: self.total.clone().unwrap_or_default(),
            merchant: self.merchant.clone().unwrap_or_default(),
            line_items: self.line_items.iter().map(SummaryLine::from).collect(),
        }
    }
}

/// Flat, string-only view of a receipt for tables and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    pub date: String,
    pub total: String,
    pub merchant: String,
    pub line_items: Vec<SummaryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub description: String,
    /// `$X.XX`
    pub amount: String,
}

pub const UNKNOWN_ITEM: &str = "Unknown Item";

impl From<&LineItem> for SummaryLine {
    fn from(item: &LineItem) -> Self {
        let description = if item.description.is_empty() {
            UNKNOWN_ITEM.to_string()
        } else {
            item.description.clone()
        };
        SummaryLine { description, amount: item.amount.to_string() }
    }
}

/// `Option<String>` that travels as `""` when absent.
mod blank {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::EngineWord;

    fn item(description: &str, cents: u32) -> LineItem {
        LineItem {
            description: description.into(),
            amount: Money::from_cents(cents),
            bounds: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        }
    }

    #[test]
    fn absent_fields_serialize_as_empty_strings() {
        let r = StructuredReceipt { total: Some("$42.50".into()), ..Default::default() };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "");
        assert_eq!(json["merchant"], "");
        assert_eq!(json["total"], "$42.50");
        assert_eq!(json["line_items"], serde_json::json!([]));
    }

    #[test]
    fn empty_strings_deserialize_as_absent() {
        let r: StructuredReceipt =
            serde_json::from_str(r#"{"date":"","total":"$1","merchant":"","line_items":[]}"#).unwrap();
        assert_eq!(r.date, None);
        assert_eq!(r.total.as_deref(), Some("$1"));
        assert!(r.words.is_empty());
    }

    #[test]
    fn line_item_amount_is_a_number() {
        let json = serde_json::to_value(item("Milk 2", 399)).unwrap();
        assert_eq!(json["amount"], serde_json::json!(3.99));
        assert_eq!(json["bounds"]["x1"], serde_json::json!(10.0));
    }

    #[test]
    fn summary_fills_defaults() {
        let r = StructuredReceipt {
            merchant: Some("FRESH MART".into()),
            line_items: vec![item("", 0), item("Bread", 250)],
            ..Default::default()
        };
        let s = r.summary();
        assert_eq!(s.merchant, "FRESH MART");
        assert_eq!(s.date, "");
        assert_eq!(s.line_items[0], SummaryLine { description: UNKNOWN_ITEM.into(), amount: "$0.00".into() });
        assert_eq!(s.line_items[1].amount, "$2.50");
        assert_eq!(r.items_total(), Money::from_cents(250));
    }

    #[test]
    fn input_from_page_adapts_words() {
        let page = OcrPage {
            text: "HELLO".into(),
            confidence: 88.0,
            words: Some(vec![EngineWord {
                text: "HELLO".into(),
                confidence: 88.0,
                bbox: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            }]),
        };
        let input = OcrInput::from(page);
        assert_eq!(input.words.len(), 1);
        assert_eq!(input.words[0].bounds, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn input_contract_words_optional() {
        let input: OcrInput = serde_json::from_str(r#"{"text":"X"}"#).unwrap();
        assert!(input.words.is_empty());
    }
}
