//! Match highlighting
//!
//! Splits display text into segments around the search terms so callers can
//! render matched spans distinctly. The split is lossless: concatenating the
//! segment texts in order reproduces the input byte for byte.

use regex::RegexBuilder;
use serde::Serialize;

/// One span of display text, flagged when it equals a search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            is_match: false,
        }
    }

    fn matched(text: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            is_match: true,
        }
    }
}

/// Extract highlight terms from the raw query text: whitespace-split,
/// keeping only tokens of at least two characters
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_string())
        .collect()
}

/// Split `text` into segments, marking spans that equal one of `terms`
/// case-insensitively
///
/// Terms are escaped before being joined into an alternation, so a term
/// like `a.c` only ever matches the literal text `a.c`. With no usable
/// terms the whole text comes back as one unmatched segment.
pub fn highlight(text: &str, terms: &[String]) -> Vec<Segment> {
    if text.is_empty() {
        return vec![Segment::plain("")];
    }

    let usable: Vec<&String> = terms.iter().filter(|t| !t.is_empty()).collect();
    if usable.is_empty() {
        return vec![Segment::plain(text)];
    }

    let alternation = usable
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    let re = match RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(re) => re,
        // Escaped literals always compile; if they somehow don't, fall
        // back to no highlighting rather than dropping the text.
        Err(_) => return vec![Segment::plain(text)],
    };

    let mut segments = Vec::new();
    let mut last_end = 0;

    for found in re.find_iter(text) {
        if found.start() > last_end {
            segments.push(Segment::plain(&text[last_end..found.start()]));
        }
        segments.push(Segment::matched(found.as_str()));
        last_end = found.end();
    }
    if last_end < text.len() {
        segments.push(Segment::plain(&text[last_end..]));
    }

    if segments.is_empty() {
        segments.push(Segment::plain(text));
    }
    segments
}
