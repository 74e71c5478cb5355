//! # shield-rs
//!
//! Stateless token authentication and time-debt rate limiting for HTTP API
//! gateways.
//!
//! ## Features
//!
//! - **Signed envelopes**: HMAC-SHA256 tokens that carry their own expiry
//! - **Quota tokens**: anonymous api tokens, each with its own time budget
//! - **User tokens**: short lived identity assertions, propagated to handlers
//! - **Time-debt rate limiting**: callers spend wall clock handling time, not
//!   request counts, from a bucket that refills at a fixed rate
//! - **Pluggable storage**: in-memory buckets, or Redis behind the `redis`
//!   feature for several gateway instances
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use shield_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/shield.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library Mode
//!
//! ```rust
//! use shield_rs::auth::{Signer, new_quota_token};
//! use shield_rs::core::{RateLimiter, UseResult};
//!
//! # #[tokio::main]
//! # async fn main() -> shield_rs::Result<()> {
//! let signer = Signer::new("change me");
//! let limiter = RateLimiter::default();
//!
//! let token = new_quota_token(&signer)?;
//! assert_eq!(limiter.can_use(&token, &signer).await?, UseResult::Success);
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use auth::Signer;
pub use config::Config;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// A configured gateway, ready to serve
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance, connecting its rate limit store
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");
        let server = server::HttpServer::new(&config).await?;
        Ok(Self { config, server })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the gateway server until it is shut down
    pub async fn run(self) -> Result<()> {
        info!("Starting shield gateway");
        info!("Configuration: {:#?}", self.config);
        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
