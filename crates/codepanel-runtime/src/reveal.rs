#![forbid(unsafe_code)]

//! Reveal progress and speed.
//!
//! [`RevealState`] counts how many characters of a source are visible, whether
//! playback is still running, and the current [`Speed`] multiplier. It is a
//! pure state machine; time enters only through the delay a caller derives
//! from [`Speed::scale`].
//!
//! # Example
//!
//! ```
//! use codepanel_runtime::reveal::{RevealState, Speed};
//!
//! let mut state = RevealState::new(2);
//! assert!(state.running());
//! assert!(state.advance());
//! assert!(state.advance());
//! assert!(!state.running());
//! assert!(!state.advance());
//!
//! assert_eq!(Speed::MIN.cycled().get(), 2);
//! assert_eq!(Speed::MAX.cycled(), Speed::MIN);
//! ```

use std::fmt;
use std::time::Duration;

use crate::error::TypingError;

/// Reveal speed multiplier, always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(4);

    /// Validate a multiplier.
    pub fn new(multiplier: u8) -> Result<Self, TypingError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&multiplier) {
            Ok(Self(multiplier))
        } else {
            Err(TypingError::InvalidSpeed(multiplier))
        }
    }

    /// The raw multiplier.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next speed in the cycle `1 → 2 → 3 → 4 → 1`.
    #[must_use]
    pub const fn cycled(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MIN
        } else {
            Self(self.0 + 1)
        }
    }

    /// `base / multiplier`.
    pub fn scale(self, base: Duration) -> Duration {
        base / u32::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Revealed length, running flag and speed.
///
/// `revealed` only grows, never exceeds `len`, and reaches `len` exactly once;
/// `running` drops to false at that moment and never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    revealed: usize,
    len: usize,
    running: bool,
    speed: Speed,
}

impl RevealState {
    /// Fresh state for a source of `len` characters.
    ///
    /// An empty source starts (and stays) complete.
    pub fn new(len: usize) -> Self {
        Self::with_speed(len, Speed::MIN)
    }

    /// Fresh state with an initial speed.
    pub fn with_speed(len: usize, speed: Speed) -> Self {
        Self {
            revealed: 0,
            len,
            running: len > 0,
            speed,
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Whether every character is visible.
    pub fn is_complete(&self) -> bool {
        self.revealed == self.len
    }

    /// Characters still hidden.
    pub fn remaining(&self) -> usize {
        self.len - self.revealed
    }

    /// Fraction revealed in `[0.0, 1.0]`; an empty source counts as done.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            1.0
        } else {
            self.revealed as f64 / self.len as f64
        }
    }

    /// Reveal one more character.
    ///
    /// Returns `false` (and changes nothing) once playback has stopped.
    pub fn advance(&mut self) -> bool {
        if !self.running || self.revealed >= self.len {
            return false;
        }
        self.revealed += 1;
        if self.revealed == self.len {
            self.running = false;
        }
        true
    }

    /// Reveal everything and stop. Returns whether anything changed.
    pub fn complete(&mut self) -> bool {
        let changed = self.running || self.revealed != self.len;
        self.revealed = self.len;
        self.running = false;
        changed
    }

    /// Move to the next speed and return it. Never touches `revealed`.
    pub fn cycle_speed(&mut self) -> Speed {
        self.speed = self.speed.cycled();
        self.speed
    }
}
