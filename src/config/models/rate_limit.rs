//! Rate limiting configuration

use super::*;
use crate::core::rate_limiter::RateLimiterSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Largest time budget per subject
    #[serde(default = "default_capacity_ms")]
    pub capacity_ms: u64,
    /// Refill tick
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Budget added per tick
    #[serde(default = "default_per_interval_ms")]
    pub per_interval_ms: u64,
    /// Max age of an api token, unlimited when unset
    #[serde(default)]
    pub token_timeout_secs: Option<u64>,
    #[serde(default = "default_clean_interval_secs")]
    pub clean_interval_secs: u64,
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity_ms: default_capacity_ms(),
            interval_ms: default_interval_ms(),
            per_interval_ms: default_per_interval_ms(),
            token_timeout_secs: None,
            clean_interval_secs: default_clean_interval_secs(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn settings(&self) -> RateLimiterSettings {
        RateLimiterSettings {
            capacity: Duration::from_millis(self.capacity_ms),
            interval: Duration::from_millis(self.interval_ms),
            per_interval: Duration::from_millis(self.per_interval_ms),
            token_timeout: self.token_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn clean_interval(&self) -> Duration {
        Duration::from_secs(self.clean_interval_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}
