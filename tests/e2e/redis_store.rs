//! Redis store tests
//!
//! Each test uses its own key prefix so runs never see each other's buckets.

#[cfg(test)]
mod tests {
    use crate::{assert_ok, skip_without_env};
    use shield_rs::auth::{Signer, new_quota_token};
    use shield_rs::core::rate_limiter::{
        RateLimitStore, RateLimiter, RateLimiterSettings, RedisRateLimitStore, UseResult,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    const REDIS_URL_VAR: &str = "SHIELD_TEST_REDIS_URL";

    async fn store() -> RedisRateLimitStore {
        let url = std::env::var(REDIS_URL_VAR).unwrap();
        let prefix = format!("shield-test:{}:", Uuid::new_v4());
        assert_ok!(RedisRateLimitStore::connect(&url, prefix, Duration::from_secs(60)).await)
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_incr_by_ceil_and_debt() {
        skip_without_env!(REDIS_URL_VAR);
        let store = store().await;

        assert_eq!(store.get("k").await.unwrap(), 0);
        assert!(store.last_modified("k").await.unwrap().is_none());

        assert_eq!(store.incr_by_ceil("k", 10, 15).await.unwrap(), (10, false));
        assert_eq!(store.incr_by_ceil("k", 10, 15).await.unwrap(), (15, true));
        assert_eq!(store.decr_by("k", 40).await.unwrap(), -25);
        assert_eq!(store.get("k").await.unwrap(), -25);
        assert!(store.last_modified("k").await.unwrap().is_some());
        assert_eq!(store.name(), "redis");
    }

    /// Two limiters over one redis share buckets, like two gateway processes
    #[tokio::test]
    #[ignore]
    async fn test_redis_shared_between_limiters() {
        skip_without_env!(REDIS_URL_VAR);
        let store = Arc::new(store().await);
        let a = RateLimiter::new(RateLimiterSettings::default(), store.clone());
        let b = RateLimiter::new(RateLimiterSettings::default(), store);

        let signer = Signer::new("redis");
        let token = new_quota_token(&signer).unwrap();

        assert_eq!(a.can_use(&token, &signer).await.unwrap(), UseResult::Success);
        a.use_time(&token, Duration::from_secs(45)).await.unwrap();
        assert_eq!(b.can_use(&token, &signer).await.unwrap(), UseResult::RateLimited);
    }
}
