//! Cryptographic utilities for the gateway
//!
//! HMAC tagging used by the token signer, and random key material.

pub mod hmac;
pub mod keys;
