//! Rate limiter helpers and the background sweep

use super::limiter::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Convert a duration to the store's nanosecond unit, saturating at `i64::MAX`
pub fn duration_to_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

/// Characters of an identifier that may appear in logs
const LOGGED_PREFIX_CHARS: usize = 8;

/// Shorten an identifier for logging
///
/// Identifiers can be bearer tokens, so only a short prefix is ever logged.
pub(super) fn redact(identifier: &str) -> &str {
    match identifier.char_indices().nth(LOGGED_PREFIX_CHARS) {
        Some((end, _)) => &identifier[..end],
        None => identifier,
    }
}

impl RateLimiter {
    /// Remove buckets untouched for `stale_after`
    pub async fn cleanup(&self, stale_after: Duration) {
        match self.store.clean(stale_after).await {
            Ok(()) => debug!("Swept {} rate limit store", self.store.name()),
            Err(e) => error!("Rate limit store sweep failed: {}", e),
        }
    }

    /// Start the periodic sweep
    ///
    /// This is the only background task the limiter runs. Dropping the handle
    /// does not stop it; abort it to stop sweeping.
    pub fn start_cleanup_task(self: Arc<Self>, every: Duration, stale_after: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                limiter.cleanup(stale_after).await;
            }
        })
    }
}
