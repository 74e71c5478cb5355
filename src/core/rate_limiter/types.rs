//! Rate limiter types

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Per-subject bucket, as kept by the in-memory store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketState {
    /// Remaining budget in nanoseconds, negative when in debt
    pub value: i64,
    pub last_modified: DateTime<Utc>,
}

/// Outcome of asking whether a subject may make a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseResult {
    /// The bucket has budget left
    Success,
    /// The token failed verification
    TokenInvalid,
    /// The token verified but is older than the configured max age
    TokenExpired,
    /// The bucket is empty or in debt
    RateLimited,
}

impl UseResult {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Limiter tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterSettings {
    /// Largest budget a bucket can hold
    pub capacity: Duration,
    /// Length of one refill tick
    pub interval: Duration,
    /// Budget added per elapsed tick
    pub per_interval: Duration,
    /// Max age of a quota token, independent of its envelope expiry
    pub token_timeout: Option<Duration>,
}

impl Default for RateLimiterSettings {
    fn default() -> Self {
        Self {
            capacity: Duration::from_secs(30),
            interval: Duration::from_secs(5),
            per_interval: Duration::from_secs(5),
            token_timeout: None,
        }
    }
}
