#![forbid(unsafe_code)]

//! Text handling for codepanel.
//!
//! - [`SourceText`] - normalized, grapheme-indexed source
//! - [`Classifier`] - per-line syntax classification into [`Token`]s
//! - [`HighlightedLine`] - a classified line and its plain/classified [`Segment`]s
//! - [`HighlightTheme`] - token class to [`Style`] mapping for dark and light panels
//!
//! # Example
//! ```
//! use codepanel_text::{Classifier, SourceText, TokenClass, highlight_lines};
//!
//! let source = SourceText::new("print(\"hi\")\n");
//! let lines = highlight_lines(&Classifier::python(), source.as_str());
//! assert_eq!(lines.len(), 1);
//!
//! let classes: Vec<_> = lines[0].segments().iter().map(|s| s.class).collect();
//! assert_eq!(
//!     classes,
//!     [TokenClass::Call, TokenClass::Plain, TokenClass::String, TokenClass::Plain]
//! );
//! ```

pub mod classify;
pub mod highlight;
pub mod source;
pub mod style;
pub mod theme;

pub use classify::{
    Classifier, ClassifierConfig, PYTHON_KEYWORDS, Token, TokenClass, validate_tokens,
};
pub use highlight::{HighlightedLine, Segment, highlight_lines};
pub use source::{SourceText, normalize};
pub use style::{Rgb, Style, StyleFlags};
pub use theme::{HighlightTheme, HighlightThemeBuilder, ThemeMode};
