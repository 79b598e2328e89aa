//! Retry configuration types
//!
//! [`RetryConfig`] is a plain serde value so it can sit inside a larger
//! configuration file; validation happens separately, before an executor is
//! built from it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Retry policy for an operation
///
/// Delays follow bounded exponential backoff: the first retry waits
/// `min-delay-ms`, each subsequent retry doubles the wait, and no wait ever
/// exceeds `max-delay-ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay before the first retry, in milliseconds
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Upper bound on any backoff delay, in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_min_delay() -> u64 {
    1000
}
fn default_max_delay() -> u64 {
    4000
}

impl RetryConfig {
    /// Base backoff delay as a [`Duration`]
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    /// Backoff delay cap as a [`Duration`]
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Check structural invariants
    ///
    /// Rejects policies that could never run an operation
    /// (`max_attempts == 0`) and inverted delay bounds. Runs before any
    /// operation executes, so a bad policy never costs an attempt.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::ZeroAttempts);
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(Error::DelayBoundsInverted {
                min_ms: self.min_delay_ms,
                max_ms: self.max_delay_ms,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.min_delay(), Duration::from_millis(1000));
        assert_eq!(config.max_delay(), Duration::from_millis(4000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ZeroAttempts)));
    }

    #[test]
    fn inverted_delay_bounds_rejected() {
        let config = RetryConfig {
            min_delay_ms: 5000,
            max_delay_ms: 1000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::DelayBoundsInverted {
                min_ms: 5000,
                max_ms: 1000
            })
        ));
    }

    #[test]
    fn equal_delay_bounds_accepted() {
        let config = RetryConfig {
            min_delay_ms: 2000,
            max_delay_ms: 2000,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn kebab_case_yaml_round_trip() {
        let yaml = "max-attempts: 5\nmin-delay-ms: 250\nmax-delay-ms: 8000\n";
        let config: RetryConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.min_delay_ms, 250);
        assert_eq!(config.max_delay_ms, 8000);

        let rendered = serde_yaml_ng::to_string(&config).unwrap();
        assert!(rendered.contains("max-attempts: 5"));
        assert!(rendered.contains("min-delay-ms: 250"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: RetryConfig = serde_yaml_ng::from_str("max-attempts: 7\n").unwrap();
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.min_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 4000);
    }
}
