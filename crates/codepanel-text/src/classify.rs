#![forbid(unsafe_code)]

//! Per-line syntax classification.
//!
//! Each line is classified independently. Five pattern families run over the
//! raw line and their matches are merged into one left-to-right,
//! non-overlapping token stream:
//!
//! 1. strings: a quote up to the next identical quote
//! 2. comments: the line-comment marker to end of line
//! 3. keywords: whole words from a closed vocabulary
//! 4. calls: a word immediately followed by optional whitespace and `(`
//! 5. numbers: digit words, optionally with a fractional part
//!
//! Matches are stably sorted by start offset and then scanned pairwise; when
//! a match runs past the start of the next one, the later match is dropped.
//! Family order therefore only breaks ties between matches that start at the
//! same offset (a keyword used as `if (x)` stays a keyword).

use std::ops::Range;

// ---------------------------------------------------------------------------
// Token classes
// ---------------------------------------------------------------------------

/// Syntax categories produced by the classifier.
///
/// [`TokenClass::Plain`] is never produced by [`Classifier::classify_line`];
/// it labels the uncovered gaps between tokens.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Call,
    Comment,
    String,
    Number,
    Plain,
}

impl TokenClass {
    /// Every class, in display order.
    pub const ALL: [Self; 6] = [
        Self::Keyword,
        Self::Call,
        Self::Comment,
        Self::String,
        Self::Number,
        Self::Plain,
    ];

    /// Stable lowercase name, suitable for CSS classes or logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Call => "call",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Plain => "plain",
        }
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A classified byte range within a single line.
///
/// Ranges are line-relative byte offsets and always fall on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    pub range: Range<usize>,
}

impl Token {
    /// Create a token. Panics in debug builds if the range is inverted.
    pub fn new(class: TokenClass, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "token range must be ordered");
        Self { class, range }
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Extract the token's text from its line.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.range.clone()]
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Reserved words highlighted by [`Classifier::python`].
pub const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "else", "elif", "for", "while", "try",
    "except", "and", "or", "not", "in", "is", "True", "False", "None",
];

/// Configuration for a [`Classifier`].
#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    /// Line comment marker. Empty disables the comment family.
    pub line_comment: &'static str,
    /// Bytes that open (and close) a string literal.
    pub quotes: &'static [u8],
}

/// Fixed-pattern line classifier.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::python()
    }
}

impl Classifier {
    /// Create a classifier with the given configuration.
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The pattern set used by the code panel.
    pub const fn python() -> Self {
        Self::new(ClassifierConfig {
            name: "Python",
            keywords: PYTHON_KEYWORDS,
            line_comment: "#",
            quotes: b"'\"",
        })
    }

    /// Human-readable name of the pattern set.
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Whether `word` is in the reserved vocabulary.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.config.keywords.contains(&word)
    }

    /// Classify one line (which must not contain `\n`).
    ///
    /// The result is sorted, non-overlapping and never contains
    /// [`TokenClass::Plain`].
    pub fn classify_line(&self, line: &str) -> Vec<Token> {
        debug_assert!(!line.contains('\n'), "classify_line expects a single line");
        if line.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        self.scan_strings(line, &mut matches);
        self.scan_comment(line, &mut matches);
        self.scan_words(line, &mut matches);

        // Stable: equal starts keep family order.
        matches.sort_by_key(|token| token.range.start);
        drop_overlaps(&mut matches);

        debug_assert!(validate_tokens(line, &matches));
        matches
    }

    /// A quote up to the next identical quote. No escapes; an unmatched quote
    /// is skipped and scanning resumes on the following byte.
    fn scan_strings(&self, line: &str, out: &mut Vec<Token>) {
        let bytes = line.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            let quote = bytes[pos];
            if self.config.quotes.contains(&quote)
                && let Some(offset) = bytes[pos + 1..].iter().position(|&b| b == quote)
            {
                let end = pos + 1 + offset + 1;
                out.push(Token::new(TokenClass::String, pos..end));
                pos = end;
                continue;
            }
            pos += 1;
        }
    }

    /// First comment marker to end of line.
    fn scan_comment(&self, line: &str, out: &mut Vec<Token>) {
        let marker = self.config.line_comment;
        if marker.is_empty() {
            return;
        }
        if let Some(start) = line.find(marker) {
            out.push(Token::new(TokenClass::Comment, start..line.len()));
        }
    }

    /// Keywords, calls and numbers, all keyed on maximal ASCII word runs.
    ///
    /// Each family is appended as a block so insertion order stays
    /// keywords, calls, numbers.
    fn scan_words(&self, line: &str, out: &mut Vec<Token>) {
        let bytes = line.as_bytes();
        let mut keywords = Vec::new();
        let mut calls = Vec::new();
        let mut numbers = Vec::new();

        let mut pos = 0;
        while pos < bytes.len() {
            if !is_word_byte(bytes[pos]) {
                pos += 1;
                continue;
            }
            let start = pos;
            pos = word_end(bytes, pos);
            let word = &line[start..pos];

            if self.is_keyword(word) {
                keywords.push(Token::new(TokenClass::Keyword, start..pos));
            }
            if opens_call(line, pos) {
                calls.push(Token::new(TokenClass::Call, start..pos));
            }
            if let Some(end) = number_end(bytes, start, pos) {
                numbers.push(Token::new(TokenClass::Number, start..end));
            }
        }

        out.append(&mut keywords);
        out.append(&mut calls);
        out.append(&mut numbers);
    }
}

/// Drop every match that starts before its predecessor ends.
///
/// Scans adjacent pairs; after a removal the same position is re-checked
/// against the new neighbour, so an early long match can swallow several
/// later ones.
fn drop_overlaps(matches: &mut Vec<Token>) {
    let mut idx = 0;
    while idx + 1 < matches.len() {
        if matches[idx].range.end > matches[idx + 1].range.start {
            matches.remove(idx + 1);
        } else {
            idx += 1;
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn word_end(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_word_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Whether the word ending at `end` is followed by optional whitespace and `(`.
///
/// Any Unicode whitespace counts, so `print\u{a0}(` is still a call.
fn opens_call(line: &str, end: usize) -> bool {
    line[end..].chars().find(|c| !c.is_whitespace()) == Some('(')
}

/// End of a numeric literal whose integer part is the word `start..end`.
fn number_end(bytes: &[u8], start: usize, end: usize) -> Option<usize> {
    if !bytes[start..end].iter().all(u8::is_ascii_digit) {
        return None;
    }
    // Fractional part: `.` followed by another all-digit word.
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        let frac_end = word_end(bytes, end + 1);
        if bytes[end + 1..frac_end].iter().all(u8::is_ascii_digit) {
            return Some(frac_end);
        }
    }
    Some(end)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that all token ranges are in-bounds, ordered and non-overlapping.
pub fn validate_tokens(line: &str, tokens: &[Token]) -> bool {
    let len = line.len();
    let mut prev_end = 0;
    for token in tokens {
        if token.range.start > token.range.end {
            return false;
        }
        if token.range.end > len {
            return false;
        }
        if token.range.start < prev_end {
            return false; // overlapping
        }
        prev_end = token.range.end;
    }
    true
}
