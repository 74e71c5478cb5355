//! Core functionality for the gateway
//!
//! The rate limiter and the gate that runs on every request.

pub mod gate;
pub mod rate_limiter;

pub use gate::{Gatekeeper, HandlerPolicy, PolicyRegistry};
pub use rate_limiter::{RateLimitStore, RateLimiter, UseResult};
