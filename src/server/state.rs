//! Application state shared across HTTP handlers

use crate::config::{Config, apply_routes};
use crate::core::gate::Gatekeeper;
use crate::core::rate_limiter::{RateLimitStore, RateLimiter};
use crate::server::routes::builtin_policies;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything in here is immutable once the server starts.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request gate, also used by handlers to issue tokens
    pub gatekeeper: Arc<Gatekeeper>,
}

impl AppState {
    /// Wire the gate for `config` over the given store
    pub fn new(config: Config, store: Arc<dyn RateLimitStore>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit().settings(), store));
        let policies = apply_routes(builtin_policies(), config.routes());

        let gatekeeper = Gatekeeper::new(config.auth().signer(), limiter, policies)
            .with_settings(
                config
                    .auth()
                    .gate_settings(config.server().trust_forwarded_for),
            )
            .with_user_token_ttl(config.auth().user_token_ttl());

        Self {
            config: Arc::new(config),
            gatekeeper: Arc::new(gatekeeper),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        self.gatekeeper.limiter()
    }
}
