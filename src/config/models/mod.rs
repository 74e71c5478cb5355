//! Configuration data models
//!
//! This module defines all configuration structures used by the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod gateway;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use gateway::*;
pub use rate_limit::*;
pub use routes::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

pub fn default_api_token_header() -> String {
    "X-API-TOKEN".to_string()
}

pub fn default_user_token_header() -> String {
    "X-USER-TOKEN".to_string()
}

pub fn default_user_param() -> String {
    "_asUser".to_string()
}

/// Default user token lifetime, 48 hours
pub fn default_user_token_ttl_secs() -> u64 {
    48 * 60 * 60
}

pub fn default_capacity_ms() -> u64 {
    30_000
}

pub fn default_interval_ms() -> u64 {
    5_000
}

pub fn default_per_interval_ms() -> u64 {
    5_000
}

/// How often stale buckets are swept
pub fn default_clean_interval_secs() -> u64 {
    60
}

/// Idle time after which a bucket is swept
pub fn default_stale_after_secs() -> u64 {
    300
}

pub fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

pub fn default_key_prefix() -> String {
    "shield:rl:".to_string()
}
