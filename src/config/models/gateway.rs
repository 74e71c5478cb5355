//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the signing secret
pub const ENV_SECRET: &str = "SHIELD_SECRET";
pub const ENV_HOST: &str = "SHIELD_HOST";
pub const ENV_PORT: &str = "SHIELD_PORT";
/// Setting this switches the store to redis
pub const ENV_REDIS_URL: &str = "SHIELD_REDIS_URL";

/// Main gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Route policies, applied over the built-in ones
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl GatewayConfig {
    /// Defaults overridden by `SHIELD_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(secret) = env::var(ENV_SECRET) {
            config.auth.secret = Some(secret);
        }
        if let Ok(host) = env::var(ENV_HOST) {
            config.server.host = host;
        }
        if let Ok(port) = env::var(ENV_PORT) {
            config.server.port = port
                .parse()
                .map_err(|e| GatewayError::config(format!("Invalid {}: {}", ENV_PORT, e)))?;
        }
        if let Ok(url) = env::var(ENV_REDIS_URL) {
            config.storage.backend = StorageBackend::Redis;
            config.storage.redis_url = url;
        }

        Ok(config)
    }
}
