use std::str::FromStr;

use tally_core::{BoundingBox, Money};
use thiserror::Error;
use tracing::warn;

use crate::layout::{cluster_lines, Line};
use crate::types::LineItem;
use crate::word::Word;

re!(re_price_token, r"\$?\d+\.?\d*");
re!(re_price_value, r"^(\d+(?:\.\d*)?|\.\d+)");

#[derive(Debug, Error, PartialEq)]
pub enum LineItemError {
    #[error("Malformed price token '{token}'")]
    MalformedPrice { token: String },
}

/// Turn one line into a line item when its rightmost word looks like a price.
///
/// Lines without a trailing price (headers, addresses, …) yield `Ok(None)`.
/// A line holding only a price yields an item with an empty description.
pub fn parse_line(line: &Line) -> Result<Option<LineItem>, LineItemError> {
    let Some((last, rest)) = line.words().split_last() else {
        return Ok(None);
    };
    if !re_price_token().is_match(&last.text) {
        return Ok(None);
    }

    let amount = parse_price(&last.text)?;
    let description = rest
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let Some(bounds) = BoundingBox::envelope(line.words().iter().map(|w| &w.bounds)) else {
        return Ok(None);
    };

    Ok(Some(LineItem { description, amount, bounds }))
}

/// Parse every line, dropping lines whose price token cannot be read.
pub fn parse_lines<'a, I>(lines: I) -> Vec<LineItem>
where
    I: IntoIterator<Item = &'a Line>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(idx, line)| match parse_line(line) {
            Ok(item) => item,
            Err(e) => {
                warn!(line = idx, error = %e, "skipping line item");
                None
            }
        })
        .collect()
}

/// Cluster `words` into lines and parse each into at most one line item.
pub fn extract_line_items(words: &[Word], threshold: f32) -> Vec<LineItem> {
    parse_lines(&cluster_lines(words, threshold))
}

/// Read the leading numeric value of a price token, ignoring any `$`.
fn parse_price(token: &str) -> Result<Money, LineItemError> {
    let malformed = || LineItemError::MalformedPrice { token: token.to_string() };
    let stripped = token.replace('$', "");
    let value = re_price_value()
        .captures(stripped.trim_start())
        .and_then(|c| c.get(1))
        .ok_or_else(malformed)?
        .as_str()
        .trim_end_matches('.');
    // `.99` reads as `0.99`.
    let value = if value.starts_with('.') { format!("0{value}") } else { value.to_string() };
    Money::from_str(&value).map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LINE_THRESHOLD;

    fn word(text: &str, x0: f32, y0: f32) -> Word {
        Word::new(text, 90.0, BoundingBox::new(x0, y0, x0 + 30.0, y0 + 14.0))
    }

    fn line(words: &[(&str, f32)]) -> Line {
        Line::new(words.iter().map(|(t, x)| word(t, *x, 100.0)).collect())
    }

    #[test]
    fn parses_description_and_amount() {
        let item = parse_line(&line(&[("Milk", 10.0), ("2", 60.0), ("$3.99", 200.0)]))
            .unwrap()
            .unwrap();
        assert_eq!(item.description, "Milk 2");
        assert_eq!(item.amount, Money::from_cents(399));
    }

    #[test]
    fn reads_words_in_left_to_right_order() {
        let item = parse_line(&line(&[("4.25", 300.0), ("Bread", 5.0), ("Rye", 60.0)]))
            .unwrap()
            .unwrap();
        assert_eq!(item.description, "Bread Rye");
        assert_eq!(item.amount, Money::from_cents(425));
    }

    #[test]
    fn no_trailing_price_yields_nothing() {
        assert_eq!(parse_line(&line(&[("Tax", 10.0), ("N/A", 90.0)])), Ok(None));
        assert_eq!(parse_line(&line(&[("Main", 10.0), ("Street", 90.0)])), Ok(None));
    }

    #[test]
    fn empty_line_yields_nothing() {
        assert_eq!(parse_line(&Line::default()), Ok(None));
    }

    #[test]
    fn price_only_line_has_empty_description() {
        let item = parse_line(&line(&[("12", 250.0)])).unwrap().unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.amount, Money::from_cents(1200));
    }

    #[test]
    fn trailing_suffix_after_number_is_ignored() {
        let item = parse_line(&line(&[("Soap", 10.0), ("5.49A", 200.0)])).unwrap().unwrap();
        assert_eq!(item.amount, Money::from_cents(549));
        let item = parse_line(&line(&[("Gum", 10.0), ("1.", 200.0)])).unwrap().unwrap();
        assert_eq!(item.amount, Money::from_cents(100));
    }

    #[test]
    fn leading_decimal_point_price() {
        let item = parse_line(&line(&[("Gum", 10.0), ("$.99", 200.0)])).unwrap().unwrap();
        assert_eq!(item.description, "Gum");
        assert_eq!(item.amount, Money::from_cents(99));
        let item = parse_line(&line(&[("Gum", 10.0), (".99", 200.0)])).unwrap().unwrap();
        assert_eq!(item.amount, Money::from_cents(99));

        let words = vec![word("Gum", 10.0, 40.0), word("$.99", 200.0, 41.0)];
        assert_eq!(extract_line_items(&words, LINE_THRESHOLD).len(), 1);
    }

    #[test]
    fn malformed_price_is_an_error_for_that_line() {
        let err = parse_line(&line(&[("Store", 10.0), ("#123", 90.0)])).unwrap_err();
        assert_eq!(err, LineItemError::MalformedPrice { token: "#123".into() });

        let huge = "9".repeat(40);
        let err = parse_line(&line(&[("Oops", 10.0), (huge.as_str(), 90.0)])).unwrap_err();
        assert!(matches!(err, LineItemError::MalformedPrice { .. }));
    }

    #[test]
    fn bounds_cover_whole_line() {
        let words = vec![
            Word::new("Eggs", 90.0, BoundingBox::new(12.0, 101.0, 50.0, 113.0)),
            Word::new("dozen", 90.0, BoundingBox::new(55.0, 99.0, 110.0, 115.0)),
            Word::new("$4.10", 90.0, BoundingBox::new(220.0, 100.0, 262.0, 112.0)),
        ];
        let item = parse_line(&Line::new(words.clone())).unwrap().unwrap();
        assert_eq!(item.bounds, BoundingBox::new(12.0, 99.0, 262.0, 115.0));
        assert!(words.iter().all(|w| item.bounds.contains(&w.bounds)));
    }

    #[test]
    fn malformed_line_does_not_stop_others() {
        let words = vec![
            word("Store", 10.0, 20.0),
            word("#123", 90.0, 21.0),
            word("Apples", 10.0, 60.0),
            word("$2.00", 200.0, 61.0),
            word("Thank", 10.0, 120.0),
            word("you", 60.0, 120.0),
            word("Pears", 10.0, 160.0),
            word("1.50", 200.0, 158.0),
        ];
        let items = extract_line_items(&words, LINE_THRESHOLD);
        let descs: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descs, ["Apples", "Pears"]);
    }

    #[test]
    fn no_words_no_items() {
        assert!(extract_line_items(&[], LINE_THRESHOLD).is_empty());
    }
}
