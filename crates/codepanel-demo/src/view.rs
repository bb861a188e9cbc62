#![forbid(unsafe_code)]

//! Panel rendering.
//!
//! [`render`] turns a [`CodePanel`] into a frame of styled rows that exactly
//! fill the terminal; [`draw`] writes such a frame with crossterm. Keeping the
//! two apart lets layout be tested without a terminal.
//!
//! ```text
//! ┌ python.py │ python.out ─────────────── 2x  Skip ┐   header
//! │  1  # about_me.py                              │
//! │  2  class Developer:                           │   body
//! │  3      def __init__(self, name▌               │
//! └ ● Typing...   python.py          Ln 3   41%    ┘   status bar
//! ```

use std::io::{self, Write};
use std::ops::Range;

use codepanel_runtime::{CodePanel, Phase, PrimaryAction, Tab};
use codepanel_text::{HighlightTheme, Rgb, Style, StyleFlags};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue};
use unicode_width::UnicodeWidthChar;

const CARET: &str = "▌";

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One terminal row.
pub type Row = Vec<Span>;

/// Presentation state owned by the app rather than the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// First visible line; `None` follows the tail.
    pub scroll: Option<usize>,
    /// Caret blink phase.
    pub caret_on: bool,
}

/// Longest prefix of `text` that fits in `max_width` columns, and its width.
pub fn clip(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            return (&text[..idx], width);
        }
        width += w;
    }
    (text, width)
}

/// Display width of `text`.
pub fn text_width(text: &str) -> usize {
    clip(text, usize::MAX).1
}

/// Lines shown in a body of `height` rows out of `total`.
pub fn visible_window(total: usize, height: usize, scroll: Option<usize>) -> Range<usize> {
    let max_start = total.saturating_sub(height);
    let start = scroll.map_or(max_start, |s| s.min(max_start));
    start..total.min(start + height)
}

/// First line shown in the body of a `height`-row terminal.
pub fn body_top(panel: &CodePanel, view: ViewState, height: u16) -> usize {
    let total = match panel.tab() {
        Tab::Code => panel.gutter().len(),
        Tab::Output => panel.output().lines().count(),
    };
    let body_height = usize::from(height).saturating_sub(2);
    visible_window(total, body_height, view.scroll).start
}

/// Clip spans to `width` columns and pad the rest with `fill`.
pub fn fit_row(spans: Row, width: usize, fill: Style) -> Row {
    let mut used = 0;
    let mut out = Vec::with_capacity(spans.len() + 1);
    for span in spans {
        if used >= width {
            break;
        }
        let (text, w) = clip(&span.text, width - used);
        if !text.is_empty() {
            out.push(Span::new(text, span.style));
        }
        used += w;
    }
    if used < width {
        out.push(Span::new(" ".repeat(width - used), fill));
    }
    out
}

/// Build a full frame of exactly `height` rows of `width` columns.
pub fn render(
    panel: &CodePanel,
    theme: &HighlightTheme,
    view: ViewState,
    width: u16,
    height: u16,
) -> Vec<Row> {
    let width = usize::from(width);
    let height = usize::from(height);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut frame = Vec::with_capacity(height);
    frame.push(fit_row(header(panel, theme, width), width, theme.chrome));

    let body_height = height.saturating_sub(2);
    let body = match panel.tab() {
        Tab::Code => code_rows(panel, theme, view, body_height),
        Tab::Output => output_rows(panel, theme, view, body_height),
    };
    let body_len = body.len();
    frame.extend(body.into_iter().map(|row| fit_row(row, width, theme.background)));
    for _ in body_len..body_height {
        frame.push(fit_row(Vec::new(), width, theme.background));
    }

    if height >= 2 {
        frame.push(fit_row(status_bar(panel, theme, width), width, theme.chrome));
    }
    frame
}

fn header(panel: &CodePanel, theme: &HighlightTheme, width: usize) -> Row {
    let tab_style = |tab: Tab| {
        if panel.tab() == tab {
            theme.background.bold()
        } else if tab == Tab::Output && !panel.output_available() {
            theme.tab_inactive.dim()
        } else {
            theme.tab_inactive
        }
    };
    let code_tab = format!(" {}.{} ", panel.language(), Tab::Code.extension());
    let output_tab = format!(" {}.{} ", panel.language(), Tab::Output.extension());
    let speed = format!(" {} ", panel.speed_label());
    let button = format!(" {} ", panel.primary_action().label());

    let left = text_width(&code_tab) + text_width(&output_tab) + 1;
    let right = text_width(&speed) + 1 + text_width(&button);
    let gap = width.saturating_sub(left + right);

    let button_style = match panel.primary_action() {
        PrimaryAction::Skip => theme.chrome.bold(),
        PrimaryAction::Run => theme.button,
    };
    vec![
        Span::new(code_tab, tab_style(Tab::Code)),
        Span::new(" ", theme.chrome),
        Span::new(output_tab, tab_style(Tab::Output)),
        Span::new(" ".repeat(gap), theme.chrome),
        Span::new(speed, theme.chrome.underline()),
        Span::new(" ", theme.chrome),
        Span::new(button, button_style),
    ]
}

fn code_rows(panel: &CodePanel, theme: &HighlightTheme, view: ViewState, height: usize) -> Vec<Row> {
    let lines = panel.lines();
    let gutter = panel.gutter();
    let window = visible_window(lines.len(), height, view.scroll);
    let last = lines.len().saturating_sub(1);

    window
        .map(|idx| {
            let line = &lines[idx];
            let mut row = vec![
                Span::new(format!(" {} ", gutter[idx]), theme.gutter),
                Span::new(" ", theme.background),
            ];
            row.extend(line.segments().into_iter().map(|segment| {
                let style = theme.style_for(segment.class).patch(theme.background);
                Span::new(segment.text, style)
            }));
            if idx == last && panel.show_caret() && view.caret_on {
                row.push(Span::new(CARET, theme.caret.patch(theme.background)));
            }
            row
        })
        .collect()
}

fn output_rows(
    panel: &CodePanel,
    theme: &HighlightTheme,
    view: ViewState,
    height: usize,
) -> Vec<Row> {
    let lines: Vec<&str> = panel.output().lines().collect();
    let style = theme.output.patch(theme.background);
    visible_window(lines.len(), height, view.scroll)
        .map(|idx| vec![Span::new(format!("  {}", lines[idx]), style)])
        .collect()
}

fn status_bar(panel: &CodePanel, theme: &HighlightTheme, width: usize) -> Row {
    let status_style = match panel.phase() {
        Phase::Typing => theme.status_typing,
        Phase::Ready => theme.status_ready,
        Phase::Executed => theme.status_executed,
    }
    .patch(theme.chrome);

    let status = format!(" ● {} ", panel.status_label());
    let file = format!("  {}", panel.file_label());
    let progress = (panel.highlighter().state().progress() * 100.0).round() as u32;
    let position = format!("Ln {}  {progress:>3}% ", panel.gutter().len());

    let gap = width.saturating_sub(text_width(&status) + text_width(&file) + text_width(&position));
    vec![
        Span::new(status, status_style),
        Span::new(file, theme.chrome),
        Span::new(" ".repeat(gap), theme.chrome),
        Span::new(position, theme.chrome),
    ]
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    queue!(out, SetForegroundColor(style.fg.map_or(Color::Reset, to_color)))?;
    queue!(out, SetBackgroundColor(style.bg.map_or(Color::Reset, to_color)))?;
    let attrs = [
        (StyleFlags::BOLD, Attribute::Bold),
        (StyleFlags::DIM, Attribute::Dim),
        (StyleFlags::ITALIC, Attribute::Italic),
        (StyleFlags::UNDERLINE, Attribute::Underlined),
    ];
    for (flag, attribute) in attrs {
        if style.has(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// Write a frame starting at the top-left corner.
pub fn draw<W: Write>(out: &mut W, frame: &[Row]) -> io::Result<()> {
    for (y, row) in frame.iter().enumerate() {
        let y = u16::try_from(y).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveTo(0, y))?;
        for span in row {
            apply_style(out, span.style)?;
            queue!(out, Print(&span.text))?;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}
