//! Network utilities
//!
//! This module provides client address resolution for address-based rate limiting.

pub mod xff;

pub use xff::resolve_client_addr;
