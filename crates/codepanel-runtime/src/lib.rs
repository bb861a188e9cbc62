#![forbid(unsafe_code)]

//! Typing reveal runtime for codepanel.
//!
//! # Layers
//!
//! - [`reveal`]: pure reveal counter and [`Speed`] multiplier
//! - [`schedule`]: single-slot tick scheduling with stale-token detection
//! - [`highlighter`]: [`TypingHighlighter`], the reveal component hosts embed
//! - [`panel`]: [`CodePanel`], tabs, phases and labels around the highlighter
//! - [`config`]: [`TypingConfig`] with environment overrides
//!
//! Nothing here sleeps, spawns threads or touches a terminal. Time is passed
//! in as [`web_time::Instant`] values, so the same code drives a native event
//! loop, a browser host or a deterministic test.

pub mod config;
pub mod error;
pub mod highlighter;
pub mod panel;
pub mod reveal;
pub mod schedule;

pub use config::{ConfigError, ConfigParse, TypingConfig};
pub use error::TypingError;
pub use highlighter::{ShowOutput, TypingHighlighter};
pub use panel::{CodePanel, OutputText, PanelEvent, PanelMsg, Phase, PrimaryAction, Tab};
pub use reveal::{RevealState, Speed};
pub use schedule::{PendingTick, TickSlot, TickToken};

pub use codepanel_text::{
    Classifier, HighlightTheme, HighlightedLine, Segment, SourceText, Style, ThemeMode, TokenClass,
};
