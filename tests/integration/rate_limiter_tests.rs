//! Rate limiter integration tests over the memory store

#[cfg(test)]
mod tests {
    use shield_rs::auth::{Signer, new_quota_token};
    use shield_rs::core::rate_limiter::{
        MemoryRateLimitStore, RateLimitStore, RateLimiter, RateLimiterSettings, UseResult,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn limiter(settings: RateLimiterSettings) -> (Arc<RateLimiter>, Arc<MemoryRateLimitStore>) {
        let store = Arc::new(MemoryRateLimitStore::new());
        (Arc::new(RateLimiter::new(settings, store.clone())), store)
    }

    fn fast_settings() -> RateLimiterSettings {
        RateLimiterSettings {
            capacity: Duration::from_millis(100),
            interval: Duration::from_millis(50),
            per_interval: Duration::from_millis(50),
            token_timeout: None,
        }
    }

    /// Debt taken on by a slow request has to be paid off before the next one
    #[tokio::test]
    async fn test_debt_is_paid_off_by_refills() {
        let (limiter, _) = limiter(fast_settings());
        let signer = Signer::new("limiter");
        let token = new_quota_token(&signer).unwrap();

        assert_eq!(limiter.can_use(&token, &signer).await.unwrap(), UseResult::Success);
        // 100ms budget, 250ms spent
        let left = limiter
            .use_time(&token, Duration::from_millis(250))
            .await
            .unwrap();
        assert_eq!(left, -150_000_000);
        assert_eq!(limiter.can_use(&token, &signer).await.unwrap(), UseResult::RateLimited);

        // One tick is not enough to get out of debt
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(limiter.can_use(&token, &signer).await.unwrap(), UseResult::RateLimited);

        // Enough ticks for -150ms + 4 * 50ms > 0
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(limiter.can_use(&token, &signer).await.unwrap(), UseResult::Success);
    }

    /// Tokens and addresses have independent buckets
    #[tokio::test]
    async fn test_subjects_are_independent() {
        let (limiter, store) = limiter(fast_settings());
        let signer = Signer::new("limiter");
        let a = new_quota_token(&signer).unwrap();
        let b = new_quota_token(&signer).unwrap();

        limiter.can_use(&a, &signer).await.unwrap();
        limiter.use_time(&a, Duration::from_secs(1)).await.unwrap();

        assert_eq!(limiter.can_use(&a, &signer).await.unwrap(), UseResult::RateLimited);
        assert_eq!(limiter.can_use(&b, &signer).await.unwrap(), UseResult::Success);
        assert_eq!(limiter.can_use_raw("10.0.0.1:1").await.unwrap(), UseResult::Success);
        assert_eq!(store.len(), 3);
    }

    /// Concurrent checks and charges never lose an update
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_charges_add_up() {
        let settings = RateLimiterSettings {
            capacity: Duration::from_secs(30),
            interval: Duration::from_secs(3600),
            per_interval: Duration::from_secs(30),
            token_timeout: None,
        };
        let (limiter, store) = limiter(settings);
        limiter.can_use_raw("shared").await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        limiter.can_use_raw("shared").await.unwrap();
                        limiter
                            .use_time("shared", Duration::from_millis(1))
                            .await
                            .unwrap();
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.get("shared").await.unwrap(), 30_000_000_000 - 800_000_000);
    }

    /// The background sweep forgets idle subjects, which then start full
    #[tokio::test]
    async fn test_sweep_forgets_idle_subjects() {
        let (limiter, store) = limiter(fast_settings());
        limiter.can_use_raw("idle").await.unwrap();
        limiter.use_time("idle", Duration::from_secs(10)).await.unwrap();

        let sweep = limiter
            .clone()
            .start_cleanup_task(Duration::from_millis(20), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(150)).await;
        sweep.abort();

        assert!(store.is_empty());
        assert_eq!(limiter.can_use_raw("idle").await.unwrap(), UseResult::Success);
        assert_eq!(store.get("idle").await.unwrap(), 100_000_000);
    }
}
