//! Time-debt rate limiting
//!
//! Each subject (an api token or a client address) owns a bucket holding a
//! time budget. Requests are admitted while the budget is positive and charged
//! their actual handling time afterwards, so a bucket can go into debt. Budget
//! is refilled in fixed ticks up to a capacity.

mod limiter;
mod memory;
#[cfg(feature = "redis")]
mod redis;
mod store;
mod types;
mod utils;


pub use limiter::RateLimiter;
pub use memory::MemoryRateLimitStore;
#[cfg(feature = "redis")]
pub use redis::RedisRateLimitStore;
pub use store::RateLimitStore;
pub use types::{BucketState, RateLimiterSettings, UseResult};
pub use utils::duration_to_nanos;
