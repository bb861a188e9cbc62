#![forbid(unsafe_code)]

//! Errors raised when constructing a typing highlighter.

use std::fmt;

/// Contract violations rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingError {
    /// The base reveal interval was zero.
    ZeroInterval,
    /// A speed multiplier outside `1..=4`.
    InvalidSpeed(u8),
    /// The first tick's deadline cannot be represented by the clock.
    IntervalTooLarge,
}

impl fmt::Display for TypingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "base reveal interval must be greater than zero"),
            Self::InvalidSpeed(value) => {
                write!(f, "speed multiplier {value} is outside 1..=4")
            }
            Self::IntervalTooLarge => write!(f, "reveal interval is too large to schedule"),
        }
    }
}

impl std::error::Error for TypingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            TypingError::ZeroInterval.to_string(),
            "base reveal interval must be greater than zero"
        );
        assert_eq!(
            TypingError::InvalidSpeed(7).to_string(),
            "speed multiplier 7 is outside 1..=4"
        );
        assert_eq!(
            TypingError::IntervalTooLarge.to_string(),
            "reveal interval is too large to schedule"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<TypingError>();
    }
}
