#![forbid(unsafe_code)]

//! Demo event loop.
//!
//! The loop sleeps in `poll_event` until either input arrives, the panel's
//! next reveal tick is due, or the caret needs to blink. Every wake-up polls
//! the panel with the current time and redraws.

use std::io::{self, Write};
use std::time::Duration;

use codepanel_runtime::{CodePanel, PanelEvent, PanelMsg, Tab, ThemeMode};
use codepanel_text::{HighlightTheme, HighlightThemeBuilder, Rgb};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use web_time::Instant;

use crate::session::TerminalSession;
use crate::view::{self, ViewState};

const CARET_BLINK: Duration = Duration::from_millis(530);

/// Built-in theme for `mode`, with the button recolored when an accent is set.
fn theme_for(mode: ThemeMode, accent: Option<Rgb>) -> HighlightTheme {
    let base = HighlightTheme::for_mode(mode);
    match accent {
        Some(color) => {
            let button = base.button.bg(color);
            HighlightThemeBuilder::from_theme(base).button(button).build()
        }
        None => base,
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Panel(PanelMsg),
    ToggleTab,
    ToggleTheme,
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Map a key press to an action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => Action::Panel(PanelMsg::Primary),
        KeyCode::Char('s') => Action::Panel(PanelMsg::Skip),
        KeyCode::Char('r') => Action::Panel(PanelMsg::Run),
        KeyCode::Char('x' | '+') => Action::Panel(PanelMsg::CycleSpeed),
        KeyCode::Char('1') => Action::Panel(PanelMsg::SelectTab(Tab::Code)),
        KeyCode::Char('2') => Action::Panel(PanelMsg::SelectTab(Tab::Output)),
        KeyCode::Tab => Action::ToggleTab,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
        _ => return None,
    };
    Some(action)
}

/// Demo state around the panel.
#[derive(Debug)]
pub struct App {
    panel: CodePanel,
    theme_mode: ThemeMode,
    accent: Option<Rgb>,
    theme: HighlightTheme,
    view: ViewState,
    /// First body line of the last drawn frame.
    top: usize,
    blink_at: Instant,
    started: Instant,
    exit_after: Option<Duration>,
    quit: bool,
}

impl App {
    pub fn new(panel: CodePanel, theme_mode: ThemeMode, exit_after_ms: u64, now: Instant) -> Self {
        Self {
            panel,
            theme_mode,
            accent: None,
            theme: HighlightTheme::for_mode(theme_mode),
            view: ViewState {
                scroll: None,
                caret_on: true,
            },
            top: 0,
            blink_at: now + CARET_BLINK,
            started: now,
            exit_after: (exit_after_ms > 0).then(|| Duration::from_millis(exit_after_ms)),
            quit: false,
        }
    }

    /// Recolor the primary button in both themes.
    #[must_use]
    pub fn with_accent(mut self, accent: Option<Rgb>) -> Self {
        self.accent = accent;
        self.theme = theme_for(self.theme_mode, accent);
        self
    }

    pub fn panel(&self) -> &CodePanel {
        &self.panel
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one action.
    pub fn handle(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.quit = true,
            Action::ToggleTab => {
                let target = self.panel.tab().toggled();
                self.handle(Action::Panel(PanelMsg::SelectTab(target)), now);
            }
            Action::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.theme = theme_for(self.theme_mode, self.accent);
                tracing::debug!(theme = %self.theme_mode, "theme toggled");
            }
            Action::ScrollUp => self.view.scroll = Some(self.top.saturating_sub(1)),
            Action::ScrollDown => {
                if self.view.scroll.is_some() {
                    self.view.scroll = Some(self.top + 1);
                }
            }
            Action::Panel(msg) => {
                if let Some(event) = self.panel.update_at(msg, now) {
                    self.on_event(event);
                }
            }
        }
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(event) = self.panel.poll(now) {
            self.on_event(event);
        }
        if now >= self.blink_at {
            self.view.caret_on = !self.view.caret_on;
            self.blink_at = now + CARET_BLINK;
        }
        if let Some(limit) = self.exit_after
            && now.saturating_duration_since(self.started) >= limit
        {
            tracing::info!("exit timer elapsed");
            self.quit = true;
        }
    }

    fn on_event(&mut self, event: PanelEvent) {
        tracing::debug!(?event, "panel event");
        if matches!(event, PanelEvent::TabChanged(_) | PanelEvent::Executed) {
            self.view.scroll = Some(0);
        }
    }

    /// How long the loop may sleep before something needs redrawing.
    pub fn wait_timeout(&self, now: Instant) -> Duration {
        let blink = self.blink_at.saturating_duration_since(now);
        let tick = self.panel.time_until_tick(now).unwrap_or(blink);
        let mut timeout = blink.min(tick);
        if let Some(limit) = self.exit_after {
            let remaining = limit.saturating_sub(now.saturating_duration_since(self.started));
            timeout = timeout.min(remaining);
        }
        timeout
    }

    fn draw<W: Write>(&mut self, out: &mut W, width: u16, height: u16) -> io::Result<()> {
        let state = self.view();
        self.top = view::body_top(&self.panel, state, height);
        let frame = view::render(&self.panel, &self.theme, state, width, height);
        view::draw(out, &frame)
    }
}

/// Run the app until the user quits.
pub fn run(mut app: App, session: &TerminalSession) -> io::Result<()> {
    let mut stdout = io::stdout();
    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now);
        let (width, height) = session.size()?;
        app.draw(&mut stdout, width, height)?;
        if app.should_quit() {
            break;
        }

        if session.poll_event(app.wait_timeout(Instant::now()))? {
            match session.read_event()? {
                Event::Key(key) => {
                    if let Some(action) = action_for(key) {
                        app.handle(action, Instant::now());
                    }
                }
                Event::Resize(width, height) => {
                    tracing::trace!(width, height, "resize");
                }
                _ => {}
            }
        }
    }
    tracing::info!(phase = ?app.panel().phase(), "demo exiting");
    Ok(())
}
