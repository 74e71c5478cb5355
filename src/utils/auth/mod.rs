//! Authentication and security utilities
//!
//! This module provides the cryptographic building blocks used by token signing.

pub mod crypto;
