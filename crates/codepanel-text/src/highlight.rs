#![forbid(unsafe_code)]

//! Line-split highlighting of a (partially revealed) text.
//!
//! [`highlight_lines`] splits text on `\n` and classifies each line. A
//! [`HighlightedLine`] keeps the borrowed line text next to its tokens;
//! [`HighlightedLine::segments`] fills the gaps with plain segments so the
//! segments concatenate back to the line exactly.

use crate::classify::{Classifier, Token, TokenClass};

/// A contiguous run of one class within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub class: TokenClass,
}

impl<'a> Segment<'a> {
    /// An unclassified gap.
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            class: TokenClass::Plain,
        }
    }

    /// Whether this segment carries a syntax class.
    pub fn is_classified(&self) -> bool {
        self.class != TokenClass::Plain
    }
}

/// One rendered line: its text and the tokens covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
    pub tokens: Vec<Token>,
}

impl<'a> HighlightedLine<'a> {
    /// Classify a single line.
    pub fn new(classifier: &Classifier, number: usize, text: &'a str) -> Self {
        Self {
            number,
            text,
            tokens: classifier.classify_line(text),
        }
    }

    /// Plain and classified segments in order.
    ///
    /// An empty line yields no segments.
    pub fn segments(&self) -> Vec<Segment<'a>> {
        let source = self.text;
        let mut segments = Vec::with_capacity(self.tokens.len() * 2 + 1);
        let mut last_end = 0;

        for token in &self.tokens {
            // Fill gaps between tokens with plain text
            if token.range.start > last_end
                && let Some(gap) = source.get(last_end..token.range.start)
            {
                segments.push(Segment::plain(gap));
            }
            if let Some(text) = source.get(token.range.clone()) {
                segments.push(Segment {
                    text,
                    class: token.class,
                });
            }
            last_end = token.range.end;
        }

        // Trailing text after last token
        if last_end < source.len()
            && let Some(tail) = source.get(last_end..)
        {
            segments.push(Segment::plain(tail));
        }

        segments
    }

    /// Concatenation of all segments (equal to `text`).
    pub fn to_plain_string(&self) -> String {
        self.segments().iter().map(|s| s.text).collect()
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `text` on `\n` and classify every line.
///
/// Always returns at least one line: an empty text renders as one empty line.
pub fn highlight_lines<'a>(classifier: &Classifier, text: &'a str) -> Vec<HighlightedLine<'a>> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| HighlightedLine::new(classifier, idx + 1, line))
        .collect()
}
