use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Compiled regex cache ─────────────────────────────────────────────────────

re!(re_date,
    r"(?:\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4})|(?:\d{4}[-/.]\d{1,2}[-/.]\d{1,2})");
re!(re_total,
    r"(?i)(?:total|amount|sum|due|balance).*?\$?\s*(\d+\.?\d*)");
re!(re_currency_amount,
    r"\$?\d+\.\d{2}");

re!(re_date_year_first,
    r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$");
re!(re_date_year_last,
    r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{2,4})$");

/// Number of leading text lines searched for a merchant name.
pub const MERCHANT_SCAN_LINES: usize = 3;

/// How to read the two leading fields of a `D/D/Y` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `MM/DD/YYYY`
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY`
    DayFirst,
}

// ── Date ─────────────────────────────────────────────────────────────────────

/// First date-like substring of `text`, returned exactly as it appears.
///
/// Day/month order and two-digit years are left for the caller to resolve.
pub fn extract_date(text: &str) -> Option<String> {
    re_date().find(text).map(|m| m.as_str().to_string())
}

/// Read a raw date string produced by [`extract_date`] as a calendar date.
pub fn interpret_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(c) = re_date_year_first().captures(raw) {
        let y: i32 = c.get(1)?.as_str().parse().ok()?;
        let m: u32 = c.get(2)?.as_str().parse().ok()?;
        let d: u32 = c.get(3)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }
    let c = re_date_year_last().captures(raw)?;
    let p1: u32 = c.get(1)?.as_str().parse().ok()?;
    let p2: u32 = c.get(2)?.as_str().parse().ok()?;
    let year = expand_year(c.get(3)?.as_str().parse().ok()?);
    let (month, day) = match order {
        DateOrder::MonthFirst => (p1, p2),
        DateOrder::DayFirst => (p2, p1),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_year(y: i32) -> i32 {
    if y < 100 { 2000 + y } else { y }
}

// ── Total ────────────────────────────────────────────────────────────────────

/// Amount following the first total-like keyword, formatted as `$<digits>`.
///
/// Bare numbers without a keyword are ignored so item prices are never
/// mistaken for the total.
pub fn extract_total(text: &str) -> Option<String> {
    let c = re_total().captures(text)?;
    Some(format!("${}", c.get(1)?.as_str()))
}

// ── Merchant ─────────────────────────────────────────────────────────────────

/// First non-blank header line that is neither a date nor an amount.
pub fn extract_merchant(text: &str) -> Option<String> {
    extract_merchant_within(text, MERCHANT_SCAN_LINES)
}

/// Like [`extract_merchant`], searching the first `max_lines` lines.
pub fn extract_merchant_within(text: &str, max_lines: usize) -> Option<String> {
    text.split('\n')
        .take(max_lines)
        .filter(|l| !re_date().is_match(l))
        .filter(|l| !re_currency_amount().is_match(l))
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}
