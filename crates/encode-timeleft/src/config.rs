//! Calculator configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding the default history length.
pub const HISTORY_LENGTH_ENV: &str = "TIMELEFT_HISTORY_LENGTH";

/// Number of progress samples kept when no history length is given.
pub const DEFAULT_HISTORY_LENGTH: usize = 20;

/// Time-left calculator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeLeftConfig {
    /// Samples kept in the sliding window. Larger values make the estimate
    /// change more slowly.
    pub history_length: usize,
}

impl Default for TimeLeftConfig {
    fn default() -> Self {
        Self {
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

impl TimeLeftConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let history_length = match lookup(HISTORY_LENGTH_ENV) {
            None => DEFAULT_HISTORY_LENGTH,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    warn!(
                        "Ignoring {}={:?}, expected a positive integer; using {}",
                        HISTORY_LENGTH_ENV, raw, DEFAULT_HISTORY_LENGTH
                    );
                    DEFAULT_HISTORY_LENGTH
                }
            },
        };

        Self { history_length }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_history_length() {
        assert_eq!(TimeLeftConfig::default().history_length, 20);
    }

    #[test]
    fn test_from_lookup_reads_history_length() {
        let config = TimeLeftConfig::from_lookup(|key| {
            (key == HISTORY_LENGTH_ENV).then(|| " 50 ".to_string())
        });
        assert_eq!(config.history_length, 50);
    }

    #[test]
    fn test_from_lookup_falls_back_on_bad_values() {
        for bad in ["0", "-3", "lots", ""] {
            let config = TimeLeftConfig::from_lookup(|_| Some(bad.to_string()));
            assert_eq!(config.history_length, DEFAULT_HISTORY_LENGTH, "value {bad:?}");
        }

        let missing = TimeLeftConfig::from_lookup(|_| None);
        assert_eq!(missing, TimeLeftConfig::default());
    }
}
