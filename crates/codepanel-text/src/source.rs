#![forbid(unsafe_code)]

//! Normalized source text.
//!
//! A [`SourceText`] is built once from the caller's string and never mutated.
//! Construction unifies line terminators to `\n` and strips trailing
//! newlines. Reveal progress is counted in extended grapheme clusters, so a
//! revealed prefix never splits an emoji or a combining sequence.
//!
//! # Example
//!
//! ```
//! use codepanel_text::SourceText;
//!
//! let source = SourceText::new("x = 1\r\n\r\n");
//! assert_eq!(source.as_str(), "x = 1");
//! assert_eq!(source.len(), 5);
//! assert_eq!(source.prefix(3), "x =");
//! ```

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Unify line terminators to `\n` and strip trailing newlines.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let unified = if raw.contains('\r') {
        raw.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        raw.to_owned()
    };
    let kept = unified.trim_end_matches('\n').len();
    let mut out = unified;
    out.truncate(kept);
    out
}

/// Immutable, normalized text with grapheme boundaries precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceText {
    text: String,
    /// Byte offset at the end of each grapheme cluster, ascending.
    ends: Vec<usize>,
}

impl SourceText {
    /// Normalize `raw` and index its grapheme clusters.
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let ends: Vec<usize> = text
            .grapheme_indices(true)
            .map(|(start, grapheme)| start + grapheme.len())
            .collect();
        tracing::trace!(
            bytes = text.len(),
            graphemes = ends.len(),
            "source text normalized"
        );
        Self { text, ends }
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in grapheme clusters (the unit of reveal).
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the text is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Length in bytes.
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// The first `graphemes` clusters of the text, clamped to the full length.
    pub fn prefix(&self, graphemes: usize) -> &str {
        match graphemes.min(self.ends.len()) {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    /// Number of lines a full render produces (an empty text still has one).
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

impl From<&str> for SourceText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceText {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_converts_crlf_and_bare_cr() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn normalize_strips_trailing_newlines_only() {
        assert_eq!(normalize("x = 1  # set x\n"), "x = 1  # set x");
        assert_eq!(normalize("a\n\n\r\n"), "a");
        assert_eq!(normalize("a \n"), "a ");
        assert_eq!(normalize("\n\na"), "\n\na");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["", "\n", "a\r\n", "a\n\nb\n\n", "  \r\r", "tab\t\n"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn empty_source() {
        let source = SourceText::new("\n\n");
        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
        assert_eq!(source.prefix(5), "");
        assert_eq!(source.line_count(), 1);
    }

    #[test]
    fn prefix_counts_graphemes() {
        let source = SourceText::new("a👋é\u{301}b");
        assert_eq!(source.len(), 4);
        assert_eq!(source.prefix(1), "a");
        assert_eq!(source.prefix(2), "a👋");
        assert_eq!(source.prefix(3), "a👋é\u{301}");
        assert_eq!(source.prefix(99), source.as_str());
    }

    #[test]
    fn byte_len_differs_from_len_for_multibyte() {
        let source = SourceText::new("• x");
        assert_eq!(source.len(), 3);
        assert_eq!(source.byte_len(), 5);
    }

    #[test]
    fn line_count_after_normalization() {
        assert_eq!(SourceText::new("a\nb\n").line_count(), 2);
        assert_eq!(SourceText::new("a\n\nb").line_count(), 3);
    }

    #[test]
    fn conversions() {
        let from_str: SourceText = "a\r\n".into();
        let from_string: SourceText = String::from("a\n").into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.to_string(), "a");
    }
}
