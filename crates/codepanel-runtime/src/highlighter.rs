#![forbid(unsafe_code)]

//! Typing-reveal component.
//!
//! A [`TypingHighlighter`] owns a normalized source, its [`RevealState`] and
//! the single pending tick that will reveal the next character. Hosts drive it
//! in one of two ways:
//!
//! - **Callback timers**: read [`TypingHighlighter::pending_tick`], schedule a
//!   callback after its `delay`, and hand the token back to
//!   [`TypingHighlighter::fire`]. Stale tokens (after a skip, a manual tick or
//!   a re-arm) are ignored.
//! - **Polling loops**: call [`TypingHighlighter::poll`] with the current time;
//!   every tick whose deadline has passed is serviced.
//!
//! The delay for the next character is `base_interval / speed`, computed when
//! that tick is armed. A speed change therefore affects the next tick armed
//! after it, never the one already in flight.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use codepanel_runtime::TypingHighlighter;
//! use web_time::Instant;
//!
//! let t0 = Instant::now();
//! let mut hl = TypingHighlighter::start_at("x = 1", Duration::from_millis(100), t0).unwrap();
//! assert_eq!(hl.poll(t0 + Duration::from_millis(250)), 2);
//! assert_eq!(hl.revealed_text(), "x ");
//!
//! hl.skip();
//! assert_eq!(hl.render()[0].text, "x = 1");
//! assert!(hl.pending_tick().is_none());
//! ```

use std::time::Duration;

use codepanel_text::{Classifier, HighlightedLine, SourceText, highlight_lines};
use web_time::Instant;

use crate::config::TypingConfig;
use crate::error::TypingError;
use crate::reveal::{RevealState, Speed};
use crate::schedule::{PendingTick, TickSlot, TickToken};

/// Returned by [`TypingHighlighter::run`]: the caller should switch to its
/// output view.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOutput {
    /// Whether the run cut a still-running reveal short.
    pub forced_completion: bool,
}

/// Character-by-character reveal of a source text with per-line highlighting.
#[derive(Debug)]
pub struct TypingHighlighter {
    source: SourceText,
    state: RevealState,
    base_interval: Duration,
    slot: TickSlot,
    classifier: Classifier,
}

impl TypingHighlighter {
    /// Start revealing `source` now, one character per `base_interval`.
    pub fn start(source: &str, base_interval: Duration) -> Result<Self, TypingError> {
        Self::start_at(source, base_interval, Instant::now())
    }

    /// Start revealing `source` with `now` as time zero.
    ///
    /// The first tick is armed with `base_interval` (speed 1, no lead-in). An
    /// empty source completes immediately and arms nothing. An interval whose
    /// first deadline overflows the clock is rejected with
    /// [`TypingError::IntervalTooLarge`].
    pub fn start_at(
        source: &str,
        base_interval: Duration,
        now: Instant,
    ) -> Result<Self, TypingError> {
        Self::launch(source, base_interval, Duration::ZERO, Speed::MIN, now)
    }

    /// Start with timing taken from a [`TypingConfig`].
    ///
    /// The first tick waits `lead_in` plus the speed-scaled interval.
    pub fn with_config(source: &str, config: &TypingConfig) -> Result<Self, TypingError> {
        Self::with_config_at(source, config, Instant::now())
    }

    /// [`Self::with_config`] with an explicit time zero.
    pub fn with_config_at(
        source: &str,
        config: &TypingConfig,
        now: Instant,
    ) -> Result<Self, TypingError> {
        Self::launch(
            source,
            config.base_interval,
            config.lead_in,
            config.initial_speed,
            now,
        )
    }

    fn launch(
        source: &str,
        base_interval: Duration,
        lead_in: Duration,
        speed: Speed,
        now: Instant,
    ) -> Result<Self, TypingError> {
        if base_interval.is_zero() {
            return Err(TypingError::ZeroInterval);
        }
        let source = SourceText::new(source);
        let state = RevealState::with_speed(source.len(), speed);
        let mut hl = Self {
            source,
            state,
            base_interval,
            slot: TickSlot::new(),
            classifier: Classifier::python(),
        };
        if hl.state.running() {
            let first_delay = lead_in
                .checked_add(hl.next_delay())
                .filter(|delay| now.checked_add(*delay).is_some())
                .ok_or(TypingError::IntervalTooLarge)?;
            let first = hl.slot.arm(now, first_delay);
            tracing::debug!(
                chars = hl.source.len(),
                ?base_interval,
                first_delay = ?first.delay,
                "typing started"
            );
        } else {
            tracing::debug!("typing started on empty source; nothing to reveal");
        }
        Ok(hl)
    }

    /// Replace the classifier used by [`Self::render`].
    #[must_use]
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    pub fn speed(&self) -> Speed {
        self.state.speed()
    }

    pub fn running(&self) -> bool {
        self.state.running()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// The currently visible prefix.
    pub fn revealed_text(&self) -> &str {
        self.source.prefix(self.state.revealed())
    }

    /// Delay the next armed tick would use at the current speed.
    pub fn next_delay(&self) -> Duration {
        self.state.speed().scale(self.base_interval)
    }

    /// The one pending tick, if playback is still running.
    pub fn pending_tick(&self) -> Option<PendingTick> {
        self.slot.pending()
    }

    /// Time left until the pending tick is due.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.slot.time_until(now)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Reveal one character now.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Reveal one character, treating `now` as the current time.
    ///
    /// Any pending tick is consumed. If characters remain, the next tick is
    /// armed `next_delay()` after `now`; otherwise playback stops and nothing
    /// is armed. Returns `false` once the reveal has finished.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.slot.cancel();
        self.advance_from(now)
    }

    /// Timer callback entry point: service the tick identified by `token`.
    ///
    /// A token that is not the pending one is stale and ignored.
    pub fn fire(&mut self, token: TickToken) -> bool {
        self.fire_at(token, Instant::now())
    }

    /// [`Self::fire`] with an explicit current time.
    pub fn fire_at(&mut self, token: TickToken, now: Instant) -> bool {
        if self.slot.claim(token).is_none() {
            tracing::trace!(token = token.get(), "stale tick ignored");
            return false;
        }
        self.advance_from(now)
    }

    /// Service every tick that is due at `now`. Returns characters revealed.
    ///
    /// Each follow-up tick is armed from the previous deadline, so a late poll
    /// catches up exactly as if every timer had fired on time.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut revealed = 0;
        while let Some(due) = self.slot.claim_due(now) {
            if !self.advance_from(due.deadline) {
                break;
            }
            revealed += 1;
        }
        revealed
    }

    fn advance_from(&mut self, at: Instant) -> bool {
        if !self.state.advance() {
            return false;
        }
        tracing::trace!(
            revealed = self.state.revealed(),
            len = self.state.len(),
            "tick"
        );
        if self.state.running() {
            let delay = self.next_delay();
            self.slot.arm(at, delay);
        } else {
            tracing::debug!(chars = self.state.len(), "reveal completed");
        }
        true
    }

    /// Reveal everything, stop, and cancel the pending tick.
    ///
    /// Idempotent; returns whether anything changed.
    pub fn skip(&mut self) -> bool {
        let cancelled = self.slot.cancel();
        let changed = self.state.complete();
        if changed {
            tracing::debug!(
                cancelled = cancelled.map(|tick| tick.token.get()),
                "reveal skipped"
            );
        }
        changed
    }

    /// Advance to the next speed. Affects ticks armed from now on.
    pub fn cycle_speed(&mut self) -> Speed {
        let speed = self.state.cycle_speed();
        tracing::debug!(%speed, "speed changed");
        speed
    }

    /// "Execute": force completion if still running, then tell the caller to
    /// show its output view.
    pub fn run(&mut self) -> ShowOutput {
        let forced_completion = self.state.running() && self.skip();
        tracing::debug!(forced_completion, "run requested");
        ShowOutput { forced_completion }
    }

    /// Tear the highlighter down, returning the tick it had pending.
    ///
    /// Hosts that keep their own timer handle use the returned token to
    /// release it.
    pub fn cancel(mut self) -> Option<PendingTick> {
        let cancelled = self.slot.cancel();
        if let Some(tick) = cancelled {
            tracing::trace!(token = tick.token.get(), "pending tick cancelled");
        }
        cancelled
    }

    /// Split the revealed prefix into lines and classify each.
    ///
    /// Pure; recomputed on every call.
    pub fn render(&self) -> Vec<HighlightedLine<'_>> {
        highlight_lines(&self.classifier, self.revealed_text())
    }
}

impl Drop for TypingHighlighter {
    fn drop(&mut self) {
        if let Some(tick) = self.slot.cancel() {
            tracing::trace!(token = tick.token.get(), "pending tick cancelled on drop");
        }
    }
}
