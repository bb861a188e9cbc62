#![forbid(unsafe_code)]

//! Panel color themes.
//!
//! A [`HighlightTheme`] maps every [`TokenClass`] to a [`Style`] and carries
//! the chrome styles a renderer needs around the code (gutter, header, status
//! indicator, output view).
//!
//! ```
//! use codepanel_text::{HighlightTheme, ThemeMode, TokenClass};
//!
//! let theme = HighlightTheme::for_mode(ThemeMode::Light);
//! assert!(theme.style_for(TokenClass::Keyword).fg.is_some());
//! ```

use std::fmt;

use crate::classify::TokenClass;
use crate::style::{Rgb, Style};

/// Light or dark panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Parse `dark` or `light` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

/// Styles for every token class plus panel chrome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightTheme {
    pub keyword: Style,
    pub call: Style,
    pub comment: Style,
    pub string: Style,
    pub number: Style,
    /// Unclassified code text.
    pub plain: Style,
    /// Line-number gutter.
    pub gutter: Style,
    /// Code area background.
    pub background: Style,
    /// Header and status bars.
    pub chrome: Style,
    /// Inactive tab labels in the header.
    pub tab_inactive: Style,
    /// Verbatim output view.
    pub output: Style,
    /// Typing caret.
    pub caret: Style,
    /// Status dot while typing.
    pub status_typing: Style,
    /// Status dot once fully revealed but not run.
    pub status_ready: Style,
    /// Status dot after run.
    pub status_executed: Style,
    /// The primary (Skip/Run) button.
    pub button: Style,
}

impl HighlightTheme {
    /// A theme with every style empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in theme for a mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Style for a token class.
    #[must_use]
    pub fn style_for(&self, class: TokenClass) -> Style {
        match class {
            TokenClass::Keyword => self.keyword,
            TokenClass::Call => self.call,
            TokenClass::Comment => self.comment,
            TokenClass::String => self.string,
            TokenClass::Number => self.number,
            TokenClass::Plain => self.plain,
        }
    }

    /// Palette for dark backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        let purple = Rgb::new(192, 132, 252); // Keywords
        let yellow = Rgb::new(253, 224, 71); // Calls
        let green = Rgb::new(74, 222, 128); // Comments, output
        let orange = Rgb::new(253, 186, 116); // Strings
        let sky = Rgb::new(56, 189, 248); // Numbers
        let text = Rgb::new(243, 244, 246);
        let muted = Rgb::new(107, 114, 128);
        let panel = Rgb::new(17, 24, 39);
        let bar = Rgb::new(31, 41, 55);

        Self {
            keyword: Style::new().fg(purple),
            call: Style::new().fg(yellow),
            comment: Style::new().fg(green).italic(),
            string: Style::new().fg(orange),
            number: Style::new().fg(sky),
            plain: Style::new().fg(text),
            gutter: Style::new().fg(muted).bg(bar),
            background: Style::new().fg(text).bg(panel),
            chrome: Style::new().fg(Rgb::new(156, 163, 175)).bg(bar),
            tab_inactive: Style::new().fg(muted).bg(bar),
            output: Style::new().fg(green),
            caret: Style::new().fg(text),
            status_typing: Style::new().fg(Rgb::new(250, 204, 21)),
            status_ready: Style::new().fg(Rgb::new(156, 163, 175)),
            status_executed: Style::new().fg(green),
            button: Style::new()
                .fg(Rgb::new(255, 255, 255))
                .bg(Rgb::new(22, 163, 74))
                .bold(),
        }
    }

    /// Palette for light backgrounds (darker, more saturated).
    #[must_use]
    pub fn light() -> Self {
        let purple = Rgb::new(147, 51, 234); // Keywords
        let yellow = Rgb::new(202, 138, 4); // Calls
        let green = Rgb::new(22, 163, 74); // Comments
        let orange = Rgb::new(249, 115, 22); // Strings
        let sky = Rgb::new(2, 132, 199); // Numbers
        let text = Rgb::new(31, 41, 55);
        let muted = Rgb::new(156, 163, 175);
        let panel = Rgb::new(249, 250, 251);
        let bar = Rgb::new(243, 244, 246);

        Self {
            keyword: Style::new().fg(purple),
            call: Style::new().fg(yellow),
            comment: Style::new().fg(green).italic(),
            string: Style::new().fg(orange),
            number: Style::new().fg(sky),
            plain: Style::new().fg(text),
            gutter: Style::new().fg(muted).bg(bar),
            background: Style::new().fg(text).bg(panel),
            chrome: Style::new().fg(Rgb::new(75, 85, 99)).bg(bar),
            tab_inactive: Style::new().fg(muted).bg(bar),
            output: Style::new().fg(Rgb::new(21, 128, 61)),
            caret: Style::new().fg(text),
            status_typing: Style::new().fg(Rgb::new(250, 204, 21)),
            status_ready: Style::new().fg(muted),
            status_executed: Style::new().fg(Rgb::new(74, 222, 128)),
            button: Style::new()
                .fg(Rgb::new(255, 255, 255))
                .bg(green)
                .bold(),
        }
    }

    /// Create a builder for a custom theme.
    pub fn builder() -> HighlightThemeBuilder {
        HighlightThemeBuilder::new()
    }
}

/// Builder for custom highlight themes.
#[derive(Debug, Clone, Default)]
pub struct HighlightThemeBuilder {
    theme: HighlightTheme,
}

impl HighlightThemeBuilder {
    /// Start with every style empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing theme.
    pub fn from_theme(theme: HighlightTheme) -> Self {
        Self { theme }
    }

    pub fn keyword(mut self, style: Style) -> Self {
        self.theme.keyword = style;
        self
    }

    pub fn call(mut self, style: Style) -> Self {
        self.theme.call = style;
        self
    }

    pub fn comment(mut self, style: Style) -> Self {
        self.theme.comment = style;
        self
    }

    pub fn string(mut self, style: Style) -> Self {
        self.theme.string = style;
        self
    }

    pub fn number(mut self, style: Style) -> Self {
        self.theme.number = style;
        self
    }

    pub fn plain(mut self, style: Style) -> Self {
        self.theme.plain = style;
        self
    }

    pub fn output(mut self, style: Style) -> Self {
        self.theme.output = style;
        self
    }

    pub fn button(mut self, style: Style) -> Self {
        self.theme.button = style;
        self
    }

    /// Build the final theme.
    pub fn build(self) -> HighlightTheme {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_and_display() {
        assert_eq!(ThemeMode::parse("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse(" light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("solarized"), None);
        assert_eq!(ThemeMode::Light.to_string(), "light");
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn builtin_themes_color_every_classified_token() {
        for theme in [HighlightTheme::dark(), HighlightTheme::light()] {
            for class in TokenClass::ALL {
                assert!(
                    theme.style_for(class).fg.is_some(),
                    "{} has no color",
                    class.name()
                );
            }
        }
    }

    #[test]
    fn classes_are_visually_distinct() {
        let theme = HighlightTheme::dark();
        let colors: Vec<_> = [
            TokenClass::Keyword,
            TokenClass::Call,
            TokenClass::Comment,
            TokenClass::String,
            TokenClass::Number,
        ]
        .iter()
        .map(|&c| theme.style_for(c).fg)
        .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn builder_overrides() {
        let red = Style::new().fg(Rgb::new(255, 0, 0));
        let theme = HighlightThemeBuilder::from_theme(HighlightTheme::light())
            .keyword(red)
            .build();
        assert_eq!(theme.style_for(TokenClass::Keyword), red);
        assert_eq!(theme.call, HighlightTheme::light().call);

        let button = HighlightTheme::dark().button.bg(Rgb::new(1, 2, 3));
        let themed = HighlightThemeBuilder::from_theme(HighlightTheme::dark())
            .button(button)
            .build();
        assert_eq!(themed.button.bg, Some(Rgb::new(1, 2, 3)));
        assert!(themed.button.has(crate::style::StyleFlags::BOLD));

        let empty = HighlightTheme::builder().number(red).build();
        assert_eq!(empty.number, red);
        assert!(empty.keyword.is_plain());
    }
}
