//! Service configuration.
//!
//! Values are normally filled from the command line (see `main.rs`); the defaults
//! reproduce the reference deployment: port 8000 and an execution delay drawn from
//! 100 ms to 1 s.

use crate::execution::ExecutionDelay;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while assembling a [`ServiceConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum execution delay {min:?} exceeds maximum {max:?}")]
    InvertedDelay { min: Duration, max: Duration },

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
}

/// Everything needed to start an [`OrderSystem`](crate::lifecycle::OrderSystem) and its API.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Bounds of the random delay before a new order is executed.
    pub execution_delay: ExecutionDelay,
    /// Capacity of each actor's request channel.
    pub request_buffer: usize,
    /// Events one subscriber may have queued before it is dropped as lagging.
    pub subscriber_buffer: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            execution_delay: ExecutionDelay::default(),
            request_buffer: 32,
            subscriber_buffer: 64,
        }
    }
}

impl ServiceConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_buffer == 0 {
            return Err(ConfigError::ZeroCapacity("request_buffer"));
        }
        if self.subscriber_buffer == 0 {
            return Err(ConfigError::ZeroCapacity("subscriber_buffer"));
        }
        Ok(())
    }
}
