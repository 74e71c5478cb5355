//! Integration tests for shield-rs
//!
//! These tests drive the public API across module boundaries, without
//! mocking.

pub mod config_tests;
pub mod gate_tests;
pub mod rate_limiter_tests;
pub mod token_tests;
