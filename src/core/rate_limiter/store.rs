//! Storage interface for rate limit buckets

use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Key/value counters backing the [`RateLimiter`](super::RateLimiter)
///
/// Values are nanoseconds of budget. Every method must be safe to call
/// concurrently with every other, and a key that was never written reads as
/// zero. The conditional update in `incr_by_ceil` must be atomic as a whole,
/// never a separate read followed by a write.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Add `amount` to `key`, capping the result at `max`
    ///
    /// Returns the stored value and whether it was capped. Updates the
    /// last-modified time.
    async fn incr_by_ceil(&self, key: &str, amount: i64, max: i64) -> Result<(i64, bool)>;

    /// Subtract `amount` from `key`, allowing it to go negative. Updates the
    /// last-modified time.
    async fn decr_by(&self, key: &str, amount: i64) -> Result<i64>;

    /// Current value of `key`; does not touch the last-modified time
    async fn get(&self, key: &str) -> Result<i64>;

    /// When `key` was last modified, `None` if it does not exist
    async fn last_modified(&self, key: &str) -> Result<Option<DateTime<Utc>>>;

    /// Remove keys not modified within `stale_after`
    ///
    /// Backends that expire keys on their own may do nothing here.
    async fn clean(&self, stale_after: Duration) -> Result<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
