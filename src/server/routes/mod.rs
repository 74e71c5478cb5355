//! HTTP route modules

pub mod shield;

pub use shield::{builtin_policies, configure_routes};
