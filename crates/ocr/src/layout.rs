//! Reconstruct visual text lines from positioned words.
//!
//! OCR engines do not reliably expose their own line grouping, so lines are
//! rebuilt purely from the vertical position of each word's top edge.

use tally_core::BoundingBox;

use crate::word::Word;

/// Maximum top-edge distance, in pixels, for two words to share a line.
pub const LINE_THRESHOLD: f32 = 5.0;

/// Words judged to lie on the same visual row, ordered left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    words: Vec<Word>,
    anchor_y: f32,
}

impl Line {
    /// Build a line from arbitrary words. The anchor is the highest top edge.
    pub fn new(words: Vec<Word>) -> Self {
        let anchor_y = words
            .iter()
            .map(|w| w.bounds.y0)
            .reduce(f32::min)
            .unwrap_or_default();
        Self::anchored(words, anchor_y)
    }

    fn anchored(mut words: Vec<Word>, anchor_y: f32) -> Self {
        words.sort_by(|a, b| a.bounds.x0.total_cmp(&b.bounds.x0));
        Self { words, anchor_y }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Top edge of the word that opened this line during clustering.
    pub fn anchor_y(&self) -> f32 {
        self.anchor_y
    }

    /// Envelope of every word on the line.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::envelope(self.words.iter().map(|w| &w.bounds))
    }

    /// Word texts joined with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group words into lines by vertical proximity.
///
/// Words are visited top to bottom. A word joins the open line when its top
/// edge is within `threshold` of the top edge of the word that opened that
/// line; otherwise the open line is closed and a new one starts. The
/// reference never moves while a line is open, so a slow drift is judged
/// against the first word only.
///
/// Every input word lands in exactly one line and lines come out in
/// ascending vertical order.
pub fn cluster_lines(words: &[Word], threshold: f32) -> Vec<Line> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    // Stable: words with equal tops keep recognition order.
    sorted.sort_by(|a, b| a.bounds.y0.total_cmp(&b.bounds.y0));

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current_y = first.bounds.y0;
    let mut current: Vec<Word> = vec![first.clone()];

    for word in iter {
        if (word.bounds.y0 - current_y).abs() <= threshold {
            current.push(word.clone());
        } else {
            lines.push(Line::anchored(std::mem::take(&mut current), current_y));
            current_y = word.bounds.y0;
            current.push(word.clone());
        }
    }
    lines.push(Line::anchored(current, current_y));

    lines
}
