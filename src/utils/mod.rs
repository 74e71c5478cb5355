//! Utility modules for the gateway
//!
//! ## Module Organization
//!
//! - **auth**: Cryptographic building blocks (HMAC tags, OS randomness)
//! - **error**: The gateway error type and its HTTP rendering
//! - **net**: Client address resolution

pub mod auth;
pub mod error;
pub mod net;
