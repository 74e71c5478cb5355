//! End-to-end tests for shield-rs
//!
//! These tests need a running Redis server and the `redis` feature.
//! Run with: cargo test --all-features -- --ignored
//!
//! Required environment variables:
//! - SHIELD_TEST_REDIS_URL: For example `redis://127.0.0.1:6379`

#[cfg(feature = "redis")]
pub mod redis_store;
