#![forbid(unsafe_code)]

//! Single-slot tick scheduling.
//!
//! A [`TickSlot`] owns at most one [`PendingTick`]. Arming a new tick replaces
//! the old one, and every armed tick gets a fresh [`TickToken`], so a callback
//! carrying a cancelled or already-serviced token can be recognised as stale
//! and ignored.
//!
//! The slot never sleeps or spawns anything: hosts either wait for
//! [`TickSlot::time_until`] and then claim the due tick, or deliver the token
//! back from their own timer.

use std::time::Duration;

use web_time::Instant;

/// Identity of one armed tick. Tokens from one slot are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(u64);

impl TickToken {
    /// Raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// An armed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    pub token: TickToken,
    /// Delay the tick was armed with.
    pub delay: Duration,
    /// When the tick becomes due.
    pub deadline: Instant,
}

/// Owner of the (at most one) pending tick.
#[derive(Debug, Default)]
pub struct TickSlot {
    pending: Option<PendingTick>,
    next_token: u64,
}

impl TickSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a tick due `delay` after `from`, replacing any pending one.
    ///
    /// A deadline past the clock's range saturates at the latest instant
    /// reachable from `from`.
    pub fn arm(&mut self, from: Instant, delay: Duration) -> PendingTick {
        let token = TickToken(self.next_token);
        self.next_token += 1;
        let tick = PendingTick {
            token,
            delay,
            deadline: saturating_deadline(from, delay),
        };
        if let Some(replaced) = self.pending.replace(tick) {
            tracing::trace!(token = replaced.token.0, "pending tick replaced");
        }
        tick
    }

    /// Drop the pending tick, returning it if there was one.
    pub fn cancel(&mut self) -> Option<PendingTick> {
        self.pending.take()
    }

    /// The pending tick, if any.
    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending tick if it carries `token`.
    pub fn claim(&mut self, token: TickToken) -> Option<PendingTick> {
        match self.pending {
            Some(tick) if tick.token == token => self.pending.take(),
            _ => None,
        }
    }

    /// Take the pending tick if its deadline is at or before `now`.
    pub fn claim_due(&mut self, now: Instant) -> Option<PendingTick> {
        match self.pending {
            Some(tick) if tick.deadline <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Time left until the pending tick is due (zero if overdue).
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|tick| tick.deadline.saturating_duration_since(now))
    }
}

/// `from + delay`, clamped to what `Instant` can represent.
fn saturating_deadline(from: Instant, delay: Duration) -> Instant {
    if let Some(deadline) = from.checked_add(delay) {
        return deadline;
    }
    tracing::warn!(?delay, "tick deadline out of clock range; saturating");
    let mut deadline = from;
    let mut step = delay;
    while !step.is_zero() {
        match deadline.checked_add(step) {
            Some(later) => deadline = later,
            None => step /= 2,
        }
    }
    deadline
}
