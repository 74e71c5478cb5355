//! Authentication configuration

use super::*;
use crate::auth::sig::Signer;
use crate::core::gate::GateSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Authentication configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing secret. Without it only address limited and open routes work.
    #[serde(default)]
    pub secret: Option<String>,
    /// Lifetime of issued user tokens
    #[serde(default = "default_user_token_ttl_secs")]
    pub user_token_ttl_secs: u64,
    #[serde(default = "default_api_token_header")]
    pub api_token_header: String,
    #[serde(default = "default_user_token_header")]
    pub user_token_header: String,
    /// Query parameter the verified username is passed to handlers in
    #[serde(default = "default_user_param")]
    pub user_param: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            user_token_ttl_secs: default_user_token_ttl_secs(),
            api_token_header: default_api_token_header(),
            user_token_header: default_user_token_header(),
            user_param: default_user_param(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("user_token_ttl_secs", &self.user_token_ttl_secs)
            .field("api_token_header", &self.api_token_header)
            .field("user_token_header", &self.user_token_header)
            .field("user_param", &self.user_param)
            .finish()
    }
}

impl AuthConfig {
    /// Signer for the configured secret; an empty secret counts as unset
    pub fn signer(&self) -> Option<Signer> {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(Signer::new)
    }

    pub fn user_token_ttl(&self) -> Duration {
        Duration::from_secs(self.user_token_ttl_secs)
    }

    /// Request surface of the gate
    pub fn gate_settings(&self, trust_forwarded_for: bool) -> GateSettings {
        GateSettings {
            api_token_header: self.api_token_header.clone(),
            user_token_header: self.user_token_header.clone(),
            user_param: self.user_param.clone(),
            trust_forwarded_for,
        }
    }
}

/// Log a warning when the gateway will refuse every token dependent route
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.signer().is_none() {
        warn!(
            "No secret configured: routes needing api or user tokens will answer 'secret not set on server'"
        );
    }
}
