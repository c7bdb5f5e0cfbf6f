//! Transition timing configuration.

use crate::animation::AnimationOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default crossfade duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 0.3;

/// Errors that can occur when loading a [`TransitionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse transition config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Transition duration must be a finite, non-negative number of seconds (got {0})")]
    InvalidDuration(f64),
}

/// Timing of animated transitions.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use segue::config::TransitionConfig;
/// use std::time::Duration;
///
/// let config = TransitionConfig::from_json(r#"{ "duration_secs": 0.5 }"#).unwrap();
/// assert_eq!(config.duration(), Duration::from_millis(500));
/// assert!(config.options.begin_from_current_state);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration_secs: f64,
    pub options: AnimationOptions,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            options: AnimationOptions::default(),
        }
    }
}

impl TransitionConfig {
    pub fn new(duration: Duration, options: AnimationOptions) -> Self {
        Self {
            duration_secs: duration.as_secs_f64(),
            options,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Duration::try_from_secs_f64(self.duration_secs).is_err() {
            return Err(ConfigError::InvalidDuration(self.duration_secs));
        }
        Ok(())
    }

    /// Animation duration. Falls back to the default for invalid values.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_DURATION_SECS))
    }
}
