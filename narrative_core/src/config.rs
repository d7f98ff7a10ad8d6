//! Session timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SessionError;

/// Delays and periods of every timed transition in a session.
///
/// All values are milliseconds so the struct reads naturally from a config file.
/// Missing fields fall back to the reference timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause before a correct answer advances the script (or raises the confession).
    pub answer_reveal_delay_ms: u64,

    /// How long a wrong answer is shown before the script restarts at step 0.
    pub wrong_answer_delay_ms: u64,

    /// Pause between choosing the file ending and the file being revealed.
    pub file_reveal_delay_ms: u64,

    /// Pause between the file being revealed and the alarm going off.
    pub alarm_delay_ms: u64,

    /// Period of the flashing toggle while the alarm is active. Must be non-zero.
    pub flash_period_ms: u64,

    /// How long a newly found evidence message stays highlighted.
    pub highlight_duration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            answer_reveal_delay_ms: 800,
            wrong_answer_delay_ms: 1500,
            file_reveal_delay_ms: 2000,
            alarm_delay_ms: 2000,
            flash_period_ms: 300,
            highlight_duration_ms: 1500,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a session cannot run with.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.flash_period_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "flash_period_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn answer_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.answer_reveal_delay_ms)
    }

    pub fn wrong_answer_delay(&self) -> Duration {
        Duration::from_millis(self.wrong_answer_delay_ms)
    }

    pub fn file_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.file_reveal_delay_ms)
    }

    pub fn alarm_delay(&self) -> Duration {
        Duration::from_millis(self.alarm_delay_ms)
    }

    pub fn flash_period(&self) -> Duration {
        Duration::from_millis(self.flash_period_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }
}
