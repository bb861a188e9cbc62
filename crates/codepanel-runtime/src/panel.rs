#![forbid(unsafe_code)]

//! Code panel view model.
//!
//! [`CodePanel`] wraps a [`TypingHighlighter`] with the state the panel shows
//! around it: a code tab and an output tab, the `Typing → Ready → Executed`
//! phase, and the labels for the header and status bar.
//!
//! Hosts feed [`PanelMsg`]s to [`CodePanel::update`] and react to the returned
//! [`PanelEvent`]s, or call the named operations directly.
//!
//! | phase | primary button | output tab | status |
//! |-------|----------------|------------|--------|
//! | `Typing` | Skip | locked | `Typing...` |
//! | `Ready` | Run | locked | `Ready` |
//! | `Executed` | Run | open | `Executed` |

use std::fmt;

use codepanel_text::HighlightedLine;
use web_time::Instant;

use crate::config::TypingConfig;
use crate::error::TypingError;
use crate::highlighter::TypingHighlighter;
use crate::reveal::Speed;
use crate::schedule::TickToken;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where the panel is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Characters are still being revealed.
    Typing,
    /// Fully revealed, not yet run.
    Ready,
    /// The user has run the code; the output tab is available.
    Executed,
}

impl Phase {
    /// Status bar text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Typing => "Typing...",
            Self::Ready => "Ready",
            Self::Executed => "Executed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Code,
    Output,
}

impl Tab {
    /// Extension used in the status bar file label.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Code => "py",
            Self::Output => "out",
        }
    }

    /// The other tab.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Code => Self::Output,
            Self::Output => Self::Code,
        }
    }
}

/// What the single header button does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryAction {
    Skip,
    Run,
}

impl PrimaryAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Skip => "Skip",
            Self::Run => "Run",
        }
    }
}

/// Input messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMsg {
    /// A timer armed for this token has fired.
    Tick(TickToken),
    Skip,
    CycleSpeed,
    Run,
    SelectTab(Tab),
    /// Whatever the primary button currently does.
    Primary,
}

/// Observable transitions reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The last character became visible through a tick or a skip.
    RevealCompleted,
    SpeedChanged(Speed),
    /// The panel was run for the first time. A run that cuts the reveal
    /// short reports only this event, never a separate
    /// [`PanelEvent::RevealCompleted`].
    Executed,
    TabChanged(Tab),
}

// ---------------------------------------------------------------------------
// Output text
// ---------------------------------------------------------------------------

/// Verbatim text shown on the output tab.
///
/// Built from a single string or from a sequence joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputText(String);

impl OutputText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Output split into display lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }
}

impl From<&str> for OutputText {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for OutputText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Vec<String>> for OutputText {
    fn from(lines: Vec<String>) -> Self {
        Self(lines.join("\n"))
    }
}

impl From<&[&str]> for OutputText {
    fn from(lines: &[&str]) -> Self {
        Self(lines.join("\n"))
    }
}

impl<const N: usize> From<[&str; N]> for OutputText {
    fn from(lines: [&str; N]) -> Self {
        Self(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// CodePanel
// ---------------------------------------------------------------------------

/// Typing code panel with an output view.
#[derive(Debug)]
pub struct CodePanel {
    highlighter: TypingHighlighter,
    output: OutputText,
    language: String,
    tab: Tab,
    has_run: bool,
}

impl CodePanel {
    /// Create a panel and start typing now.
    pub fn new(
        source: &str,
        output: impl Into<OutputText>,
        config: &TypingConfig,
    ) -> Result<Self, TypingError> {
        Self::new_at(source, output, config, Instant::now())
    }

    /// Create a panel with `now` as time zero.
    pub fn new_at(
        source: &str,
        output: impl Into<OutputText>,
        config: &TypingConfig,
        now: Instant,
    ) -> Result<Self, TypingError> {
        let highlighter = TypingHighlighter::with_config_at(source, config, now)?;
        Ok(Self {
            highlighter,
            output: output.into(),
            language: config.language.clone(),
            tab: Tab::Code,
            has_run: false,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn highlighter(&self) -> &TypingHighlighter {
        &self.highlighter
    }

    pub fn phase(&self) -> Phase {
        if self.highlighter.running() {
            Phase::Typing
        } else if self.has_run {
            Phase::Executed
        } else {
            Phase::Ready
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn output(&self) -> &OutputText {
        &self.output
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.highlighter.running() {
            PrimaryAction::Skip
        } else {
            PrimaryAction::Run
        }
    }

    /// Whether the output tab can be selected.
    pub fn output_available(&self) -> bool {
        self.has_run
    }

    /// Status bar text.
    pub fn status_label(&self) -> &'static str {
        self.phase().label()
    }

    /// Status bar file label, e.g. `python.py` or `python.out`.
    pub fn file_label(&self) -> String {
        format!("{}.{}", self.language, self.tab.extension())
    }

    /// Speed button text, e.g. `2x`.
    pub fn speed_label(&self) -> String {
        self.highlighter.speed().to_string()
    }

    /// Whether the typing caret should be drawn after the revealed text.
    pub fn show_caret(&self) -> bool {
        self.highlighter.running()
    }

    /// Rendered lines of the revealed code.
    pub fn lines(&self) -> Vec<HighlightedLine<'_>> {
        self.highlighter.render()
    }

    /// Right-aligned gutter numbers, one per rendered line.
    pub fn gutter(&self) -> Vec<String> {
        let count = self.highlighter.revealed_text().split('\n').count();
        let width = count.to_string().len();
        (1..=count).map(|n| format!("{n:>width$}")).collect()
    }

    /// Time left until the next reveal tick, if typing.
    pub fn time_until_tick(&self, now: Instant) -> Option<std::time::Duration> {
        self.highlighter.time_until_tick(now)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Process one message at the current time.
    pub fn update(&mut self, msg: PanelMsg) -> Option<PanelEvent> {
        self.update_at(msg, Instant::now())
    }

    /// Process one message with an explicit current time.
    pub fn update_at(&mut self, msg: PanelMsg, now: Instant) -> Option<PanelEvent> {
        match msg {
            PanelMsg::Tick(token) => {
                let advanced = self.highlighter.fire_at(token, now);
                (advanced && self.highlighter.is_complete()).then_some(PanelEvent::RevealCompleted)
            }
            PanelMsg::Skip => self.skip(),
            PanelMsg::CycleSpeed => Some(PanelEvent::SpeedChanged(self.cycle_speed())),
            PanelMsg::Run => self.run(),
            PanelMsg::SelectTab(tab) => self.select_tab(tab),
            PanelMsg::Primary => self.activate_primary(),
        }
    }

    /// Service every due tick. Reports completion if this poll finished the
    /// reveal.
    pub fn poll(&mut self, now: Instant) -> Option<PanelEvent> {
        let revealed = self.highlighter.poll(now);
        (revealed > 0 && self.highlighter.is_complete()).then_some(PanelEvent::RevealCompleted)
    }

    /// Reveal everything without running.
    pub fn skip(&mut self) -> Option<PanelEvent> {
        self.highlighter
            .skip()
            .then_some(PanelEvent::RevealCompleted)
    }

    pub fn cycle_speed(&mut self) -> Speed {
        self.highlighter.cycle_speed()
    }

    /// Reveal everything, mark the panel executed and switch to the output
    /// tab.
    ///
    /// The first run reports [`PanelEvent::Executed`]; later runs only report
    /// the tab switch, if any.
    pub fn run(&mut self) -> Option<PanelEvent> {
        let shown = self.highlighter.run();
        let first_run = !self.has_run;
        self.has_run = true;
        let tab_changed = self.tab != Tab::Output;
        self.tab = Tab::Output;
        tracing::debug!(
            first_run,
            forced_completion = shown.forced_completion,
            language = %self.language,
            "panel executed"
        );
        if first_run {
            Some(PanelEvent::Executed)
        } else {
            tab_changed.then_some(PanelEvent::TabChanged(Tab::Output))
        }
    }

    /// Skip while typing, run otherwise.
    pub fn activate_primary(&mut self) -> Option<PanelEvent> {
        match self.primary_action() {
            PrimaryAction::Skip => self.skip(),
            PrimaryAction::Run => self.run(),
        }
    }

    /// Switch tabs. The output tab stays locked until the panel has run.
    pub fn select_tab(&mut self, tab: Tab) -> Option<PanelEvent> {
        if tab == self.tab {
            return None;
        }
        if tab == Tab::Output && !self.has_run {
            tracing::debug!("output tab locked until run");
            return None;
        }
        self.tab = tab;
        tracing::debug!(?tab, "tab changed");
        Some(PanelEvent::TabChanged(tab))
    }
}
