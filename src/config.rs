//! Configuration for the chat client core
//!
//! Provides centralized configuration for reveal pacing and session storage.

use crate::{GenbotError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default pause between revealed words
pub const DEFAULT_WORD_DELAY: Duration = Duration::from_millis(100);

/// File name of the persisted session inside the data directory
const SESSION_FILE: &str = "session.json";

/// Pacing for the word-by-word reveal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    /// Pause after each word before the next one is emitted
    pub word_delay: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            word_delay: DEFAULT_WORD_DELAY,
        }
    }
}

/// Configuration for the complete client
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Reveal scheduler configuration
    pub reveal: RevealConfig,

    /// Where the current user/thread is persisted between runs
    pub session_path: PathBuf,

    /// Width of the `=` rule under a chat export header
    pub export_rule_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            session_path: default_session_path(),
            export_rule_width: 50,
        }
    }
}

impl AppConfig {
    /// Set the delay between revealed words
    pub fn with_word_delay(mut self, delay: Duration) -> Self {
        self.reveal.word_delay = delay;
        self
    }

    /// Set where the session file lives
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.reveal.word_delay.is_zero() {
            return Err(GenbotError::ConfigError(
                "word delay must be greater than zero".to_string(),
            ));
        }

        if self.session_path.as_os_str().is_empty() {
            return Err(GenbotError::ConfigError(
                "session path is required".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_session_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("genbot").join(SESSION_FILE),
        None => PathBuf::from("genbot-session.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.reveal.word_delay, Duration::from_millis(100));
        assert_eq!(config.export_rule_width, 50);
        assert!(config.session_path.ends_with("session.json")
            || config.session_path.ends_with("genbot-session.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_word_delay(Duration::from_millis(5))
            .with_session_path("/tmp/genbot/session.json");

        assert_eq!(config.reveal.word_delay, Duration::from_millis(5));
        assert_eq!(config.session_path, PathBuf::from("/tmp/genbot/session.json"));
    }

    #[test]
    fn test_zero_delay_rejected() {
        let config = AppConfig::default().with_word_delay(Duration::ZERO);
        assert!(matches!(config.validate(), Err(GenbotError::ConfigError(_))));
    }

    #[test]
    fn test_empty_session_path_rejected() {
        let config = AppConfig::default().with_session_path("");
        assert!(config.validate().is_err());
    }
}
