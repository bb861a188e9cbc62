#![forbid(unsafe_code)]

//! Typing panel configuration.
//!
//! Defaults are 30 ms per character, a 500 ms lead-in, the `python` label,
//! the dark theme and 1x speed. Every field can be overridden from the
//! environment:
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `CODEPANEL_TYPING_MS` | `base_interval` | positive integer (ms) |
//! | `CODEPANEL_LEAD_IN_MS` | `lead_in` | integer (ms) |
//! | `CODEPANEL_LANGUAGE` | `language` | non-empty label |
//! | `CODEPANEL_THEME` | `theme` | `dark` or `light` |
//! | `CODEPANEL_SPEED` | `initial_speed` | `1`..=`4` |
//!
//! Invalid values keep the default and are reported as [`ConfigError`]s.

use std::env;
use std::fmt;
use std::time::Duration;

use codepanel_text::ThemeMode;

use crate::reveal::Speed;

pub const ENV_TYPING_MS: &str = "CODEPANEL_TYPING_MS";
pub const ENV_LEAD_IN_MS: &str = "CODEPANEL_LEAD_IN_MS";
pub const ENV_LANGUAGE: &str = "CODEPANEL_LANGUAGE";
pub const ENV_THEME: &str = "CODEPANEL_THEME";
pub const ENV_SPEED: &str = "CODEPANEL_SPEED";

/// Reveal timing and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingConfig {
    /// Delay per character at 1x speed.
    pub base_interval: Duration,
    /// Extra wait before the first character.
    pub lead_in: Duration,
    /// Opaque label shown in the status bar; never affects classification.
    pub language: String,
    pub theme: ThemeMode,
    pub initial_speed: Speed,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(30),
            lead_in: Duration::from_millis(500),
            language: "python".to_owned(),
            theme: ThemeMode::Dark,
            initial_speed: Speed::MIN,
        }
    }
}

impl TypingConfig {
    /// Defaults with a different base interval and no lead-in.
    #[must_use]
    pub fn with_interval(base_interval: Duration) -> Self {
        Self {
            base_interval,
            lead_in: Duration::ZERO,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn lead_in(mut self, lead_in: Duration) -> Self {
        self.lead_in = lead_in;
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn initial_speed(mut self, speed: Speed) -> Self {
        self.initial_speed = speed;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> TypingConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.base_interval.is_zero() {
            errors.push(ConfigError::new(
                "base_interval",
                format!("{:?}", self.base_interval),
                "must be greater than zero",
            ));
        }
        if self.lead_in.checked_add(self.base_interval).is_none() {
            errors.push(ConfigError::new(
                "lead_in",
                format!("{:?}", self.lead_in),
                "lead-in plus base interval overflows",
            ));
        }
        if self.language.trim().is_empty() {
            errors.push(ConfigError::new(
                "language",
                self.language.clone(),
                "must not be empty",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Short summary for logs.
    #[must_use]
    pub fn summary_short(&self) -> String {
        format!(
            "{}ms/char · lead-in {}ms · {} · {} · {}",
            self.base_interval.as_millis(),
            self.lead_in.as_millis(),
            self.language,
            self.theme,
            self.initial_speed
        )
    }
}

/// Configuration parse diagnostics.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: TypingConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = TypingConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_TYPING_MS) {
        match parse_millis(&value).filter(|ms| !ms.is_zero()) {
            Some(parsed) => config.base_interval = parsed,
            None => errors.push(ConfigError::new(
                "base_interval",
                value,
                "expected positive integer (milliseconds)",
            )),
        }
    }

    if let Some(value) = get(ENV_LEAD_IN_MS) {
        match parse_millis(&value) {
            Some(parsed) => config.lead_in = parsed,
            None => errors.push(ConfigError::new(
                "lead_in",
                value,
                "expected integer (milliseconds)",
            )),
        }
    }

    if let Some(value) = get(ENV_LANGUAGE) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.push(ConfigError::new("language", value, "must not be empty"));
        } else {
            config.language = trimmed.to_owned();
        }
    }

    if let Some(value) = get(ENV_THEME) {
        match ThemeMode::parse(&value) {
            Some(parsed) => config.theme = parsed,
            None => errors.push(ConfigError::new("theme", value, "expected dark|light")),
        }
    }

    if let Some(value) = get(ENV_SPEED) {
        match value.trim().parse::<u8>().ok().and_then(|m| Speed::new(m).ok()) {
            Some(parsed) => config.initial_speed = parsed,
            None => errors.push(ConfigError::new(
                "initial_speed",
                value,
                "expected integer in 1..=4",
            )),
        }
    }

    for error in &errors {
        tracing::warn!(
            field = error.field,
            value = %error.value,
            "{}; keeping default",
            error.message
        );
    }

    ConfigParse { config, errors }
}

fn parse_millis(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> ConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn default_values() {
        let config = TypingConfig::default();
        assert_eq!(config.base_interval, Duration::from_millis(30));
        assert_eq!(config.lead_in, Duration::from_millis(500));
        assert_eq!(config.language, "python");
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.initial_speed, Speed::MIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_env_gives_defaults() {
        let parsed = parse(&[]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config, TypingConfig::default());
    }

    #[test]
    fn env_overrides_all_fields() {
        let parsed = parse(&[
            (ENV_TYPING_MS, "20"),
            (ENV_LEAD_IN_MS, "0"),
            (ENV_LANGUAGE, " rust "),
            (ENV_THEME, "LIGHT"),
            (ENV_SPEED, "3"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let config = parsed.config;
        assert_eq!(config.base_interval, Duration::from_millis(20));
        assert_eq!(config.lead_in, Duration::ZERO);
        assert_eq!(config.language, "rust");
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.initial_speed.get(), 3);
    }

    #[test]
    fn invalid_values_are_reported_and_defaulted() {
        let parsed = parse(&[
            (ENV_TYPING_MS, "0"),
            (ENV_LEAD_IN_MS, "soon"),
            (ENV_LANGUAGE, "   "),
            (ENV_THEME, "neon"),
            (ENV_SPEED, "5"),
        ]);
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["base_interval", "lead_in", "language", "theme", "initial_speed"]
        );
        assert_eq!(parsed.config, TypingConfig::default());
    }

    #[test]
    fn error_display_includes_field_and_value() {
        let parsed = parse(&[(ENV_THEME, "neon")]);
        assert_eq!(
            parsed.errors[0].to_string(),
            "theme=neon (expected dark|light)"
        );
    }

    #[test]
    fn validate_rejects_zero_interval_and_blank_language() {
        let config = TypingConfig::with_interval(Duration::ZERO).language("");
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "base_interval");
        assert_eq!(errors[1].field, "language");
    }

    #[test]
    fn validate_rejects_overflowing_lead_in() {
        let config = TypingConfig::with_interval(Duration::from_millis(30)).lead_in(Duration::MAX);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "lead_in");
        assert!(TypingConfig::default().lead_in(Duration::from_secs(3600)).validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = TypingConfig::with_interval(Duration::from_millis(100))
            .lead_in(Duration::from_millis(5))
            .language("go")
            .theme(ThemeMode::Light)
            .initial_speed(Speed::MAX);
        assert_eq!(config.base_interval, Duration::from_millis(100));
        assert_eq!(config.lead_in, Duration::from_millis(5));
        assert_eq!(config.language, "go");
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.initial_speed, Speed::MAX);
    }

    #[test]
    fn summary_mentions_every_field() {
        let summary = TypingConfig::default().summary_short();
        assert_eq!(summary, "30ms/char · lead-in 500ms · python · dark · 1x");
    }
}
