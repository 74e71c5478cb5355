//! Core rate limiter implementation

use super::memory::MemoryRateLimitStore;
use super::store::RateLimitStore;
use super::types::{RateLimiterSettings, UseResult};
use super::utils::{duration_to_nanos, redact};
use crate::auth::sig::Signer;
use crate::auth::tokens::parse_quota_token;
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Time-debt token bucket over a [`RateLimitStore`]
///
/// Two near simultaneous checks may both see no elapsed tick and skip the
/// refill. That under-refills, so it never grants more than it should.
#[derive(Clone)]
pub struct RateLimiter {
    pub(super) settings: RateLimiterSettings,
    pub(super) store: Arc<dyn RateLimitStore>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("settings", &self.settings)
            .field("store", &self.store.name())
            .finish()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            RateLimiterSettings::default(),
            Arc::new(MemoryRateLimitStore::new()),
        )
    }
}

impl RateLimiter {
    /// Create a rate limiter over the given store
    pub fn new(settings: RateLimiterSettings, store: Arc<dyn RateLimitStore>) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &RateLimiterSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }

    /// Check whether an api token may be used
    ///
    /// The token is verified before its bucket is touched: an invalid token
    /// reports `TokenInvalid` even if its bucket is empty, and never creates a
    /// bucket.
    pub async fn can_use(&self, token: &str, signer: &Signer) -> Result<UseResult> {
        let Some(claims) = parse_quota_token(signer, token) else {
            return Ok(UseResult::TokenInvalid);
        };

        if let Some(timeout) = self.settings.token_timeout {
            if claims.age_at(Utc::now()) > timeout {
                debug!("Quota token {} is past its max age", claims.uuid);
                return Ok(UseResult::TokenExpired);
            }
        }

        self.can_use_raw(token).await
    }

    /// Check whether `identifier` has budget left, refilling it first if any
    /// ticks have elapsed since it was last modified
    pub async fn can_use_raw(&self, identifier: &str) -> Result<UseResult> {
        let ticks = match self.store.last_modified(identifier).await? {
            // An unseen bucket is refilled to capacity
            None => u32::MAX,
            Some(at) => {
                let elapsed = (Utc::now() - at).to_std().unwrap_or(Duration::ZERO);
                let ticks = elapsed.as_nanos() / self.settings.interval.as_nanos().max(1);
                u32::try_from(ticks).unwrap_or(u32::MAX)
            }
        };

        let remaining = if ticks > 0 {
            let refill = self.settings.per_interval.saturating_mul(ticks);
            let (value, _) = self
                .store
                .incr_by_ceil(
                    identifier,
                    duration_to_nanos(refill),
                    duration_to_nanos(self.settings.capacity),
                )
                .await?;
            value
        } else {
            self.store.get(identifier).await?
        };

        if remaining <= 0 {
            debug!("Rate limited {}… ({}ns left)", redact(identifier), remaining);
            Ok(UseResult::RateLimited)
        } else {
            Ok(UseResult::Success)
        }
    }

    /// Charge `consumed` time to `identifier`. The bucket may go into debt.
    pub async fn use_time(&self, identifier: &str, consumed: Duration) -> Result<i64> {
        self.store
            .decr_by(identifier, duration_to_nanos(consumed))
            .await
    }
}
