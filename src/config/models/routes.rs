//! Per-route policy configuration

use crate::core::gate::{HandlerPolicy, PolicyRegistry};
use serde::{Deserialize, Serialize};

/// Policy for one route pattern
///
/// ```yaml
/// routes:
///   - pattern: /token
///     by_address_not_token: true
///   - pattern: /posts
///     require_user_auth_for: [POST, DELETE]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route pattern as registered with the router
    pub pattern: String,
    #[serde(flatten)]
    pub policy: HandlerPolicy,
}

impl RouteConfig {
    pub fn new(pattern: impl Into<String>, policy: HandlerPolicy) -> Self {
        Self {
            pattern: pattern.into(),
            policy,
        }
    }
}

/// Register every configured route on top of `registry`
pub fn apply_routes(mut registry: PolicyRegistry, routes: &[RouteConfig]) -> PolicyRegistry {
    for route in routes {
        registry.register(route.pattern.clone(), route.policy.clone());
    }
    registry
}
