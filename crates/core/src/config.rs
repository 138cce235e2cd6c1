//! Configuration for the background reaper.

use crate::constants::{
    DEFAULT_POLL_INTERVAL, DEFAULT_REAPER_THREAD_NAME, REAPER_LOWER_PRIORITY_VAR,
    REAPER_POLL_INTERVAL_VAR, REAPER_THREAD_NAME_VAR,
};
use crate::errors::{Error, Result};
use std::time::Duration;

/// Configuration for a thread cleaner and its reaper thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Name given to the reaper thread
    pub reaper_name: String,
    /// Longest single wait on the notification queue before the reaper wakes
    /// up and waits again
    pub poll_interval: Duration,
    /// Whether the reaper thread drops to the lowest scheduling priority
    pub lower_priority: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            reaper_name: DEFAULT_REAPER_THREAD_NAME.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            lower_priority: true,
        }
    }
}

impl CleanerConfig {
    /// Build a configuration from the defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(REAPER_THREAD_NAME_VAR) {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "{REAPER_THREAD_NAME_VAR} must not be empty"
                )));
            }
            config.reaper_name = name.to_string();
        }

        if let Some(raw) = lookup(REAPER_POLL_INTERVAL_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|e| {
                Error::configuration(format!("invalid {REAPER_POLL_INTERVAL_VAR} '{raw}': {e}"))
            })?;
            config = config.with_poll_interval(Duration::from_millis(millis))?;
        }

        if let Some(raw) = lookup(REAPER_LOWER_PRIORITY_VAR) {
            config.lower_priority = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(Error::configuration(format!(
                        "invalid {REAPER_LOWER_PRIORITY_VAR} '{other}': expected a boolean"
                    )))
                }
            };
        }

        tracing::debug!(?config, "resolved cleaner configuration");
        Ok(config)
    }

    /// Set the reaper thread name
    #[must_use]
    pub fn with_reaper_name(mut self, name: impl Into<String>) -> Self {
        self.reaper_name = name.into();
        self
    }

    /// Set the poll interval; zero is rejected since the reaper would spin
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Result<Self> {
        if poll_interval.is_zero() {
            return Err(Error::configuration("poll interval must be greater than zero"));
        }
        self.poll_interval = poll_interval;
        Ok(self)
    }

    /// Enable or disable lowering of the reaper's scheduling priority
    #[must_use]
    pub fn with_lower_priority(mut self, lower_priority: bool) -> Self {
        self.lower_priority = lower_priority;
        self
    }
}
