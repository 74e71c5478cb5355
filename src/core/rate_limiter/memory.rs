//! In-memory rate limit store

use super::store::RateLimitStore;
use super::types::BucketState;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Keeps every bucket in a map behind a read/write lock
///
/// Writes hold the lock for the whole read-modify-write, so updates never
/// interleave. Suitable for a single process.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    buckets: RwLock<HashMap<String, BucketState>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live buckets
    pub fn len(&self) -> usize {
        self.buckets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.read().is_empty()
    }

    /// Copy of a bucket, if present
    pub fn bucket(&self, key: &str) -> Option<BucketState> {
        self.buckets.read().get(key).copied()
    }

    /// Keys last written before `threshold`, collected under the read lock
    pub(super) fn stale_keys(&self, threshold: DateTime<Utc>) -> Vec<String> {
        self.buckets
            .read()
            .iter()
            .filter(|(_, b)| b.last_modified < threshold)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Delete the `candidates` that are still stale under the write lock
    ///
    /// Keys written since they were collected survive. Returns how many keys
    /// were removed.
    pub(super) fn remove_if_stale(&self, candidates: Vec<String>, threshold: DateTime<Utc>) -> usize {
        let mut buckets = self.buckets.write();
        let mut removed = 0usize;
        for key in candidates {
            if buckets
                .get(&key)
                .is_some_and(|b| b.last_modified < threshold)
            {
                buckets.remove(&key);
                removed += 1;
            }
        }
        removed
    }

    fn update<F>(&self, key: &str, f: F) -> i64
    where
        F: FnOnce(i64) -> i64,
    {
        let mut buckets = self.buckets.write();
        let now = Utc::now();
        match buckets.get_mut(key) {
            Some(bucket) => {
                bucket.value = f(bucket.value);
                bucket.last_modified = now;
                bucket.value
            }
            None => {
                let value = f(0);
                buckets.insert(
                    key.to_string(),
                    BucketState {
                        value,
                        last_modified: now,
                    },
                );
                value
            }
        }
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn incr_by_ceil(&self, key: &str, amount: i64, max: i64) -> Result<(i64, bool)> {
        let mut clamped = false;
        let value = self.update(key, |current| {
            let next = current.saturating_add(amount);
            if next > max {
                clamped = true;
                max
            } else {
                next
            }
        });
        Ok((value, clamped))
    }

    async fn decr_by(&self, key: &str, amount: i64) -> Result<i64> {
        Ok(self.update(key, |current| current.saturating_sub(amount)))
    }

    async fn get(&self, key: &str) -> Result<i64> {
        Ok(self.buckets.read().get(key).map_or(0, |b| b.value))
    }

    async fn last_modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.buckets.read().get(key).map(|b| b.last_modified))
    }

    async fn clean(&self, stale_after: Duration) -> Result<()> {
        let stale_after = chrono::Duration::from_std(stale_after)
            .map_err(|e| GatewayError::storage(format!("Invalid sweep age: {}", e)))?;
        let threshold = Utc::now() - stale_after;

        let candidates = self.stale_keys(threshold);
        if candidates.is_empty() {
            return Ok(());
        }

        let removed = self.remove_if_stale(candidates, threshold);
        debug!("Removed {} stale rate limit buckets", removed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
