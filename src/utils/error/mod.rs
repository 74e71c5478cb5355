//! Error handling for the gateway
//!
//! This module defines the error type shared by the signer, the rate limiter
//! and the request gate, and how each error is rendered over HTTP.

mod helpers;
mod response;
mod types;

pub use response::{UNKNOWN_PROBLEM, rate_limited_status};
pub use types::{GatewayError, Result};
