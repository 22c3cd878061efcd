use crate::config::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Closed interval from which each order's execution delay is drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionDelay {
    min: Duration,
    max: Duration,
}

impl ExecutionDelay {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedDelay { min, max });
        }
        Ok(Self { min, max })
    }

    /// Same delay every time; handy for tests.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for ExecutionDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(100),
            max: Duration::from_secs(1),
        }
    }
}
