//! Per-route gate policies

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Methods a policy can require a user token for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthMethod {
    Get,
    Post,
    Put,
    Head,
    Delete,
    Patch,
    /// Every method, including ones not listed here
    Always,
}

impl AuthMethod {
    /// Map an HTTP method name; unknown methods have no flag of their own
    pub fn from_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "HEAD" => Some(Self::Head),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// How requests to one route are gated
///
/// The default policy requires an api token and no user token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerPolicy {
    /// Rate limit by client address and skip the api token entirely. Meant
    /// for the endpoint handing out api tokens.
    pub by_address_not_token: bool,
    /// No api token needed, and so no rate limiting
    pub token_not_required: bool,
    /// Methods that must carry a valid user token
    pub require_user_auth_for: BTreeSet<AuthMethod>,
}

impl HandlerPolicy {
    /// Policy rate limited by client address
    pub fn by_address() -> Self {
        Self {
            by_address_not_token: true,
            ..Self::default()
        }
    }

    /// Policy needing no api token
    pub fn open() -> Self {
        Self {
            token_not_required: true,
            ..Self::default()
        }
    }

    /// Require a user token for the given methods
    pub fn require_user_auth<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = AuthMethod>,
    {
        self.require_user_auth_for.extend(methods);
        self
    }

    /// Require a user token whatever the method
    pub fn require_user_auth_always(self) -> Self {
        self.require_user_auth([AuthMethod::Always])
    }

    pub fn requires_user_auth(&self, method: &str) -> bool {
        self.require_user_auth_for.contains(&AuthMethod::Always)
            || AuthMethod::from_method(method)
                .is_some_and(|m| self.require_user_auth_for.contains(&m))
    }
}

/// Route pattern to policy map
///
/// Patterns are the ones the router matched, e.g. `/users/{id}`.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, HandlerPolicy>,
    fallback: HandlerPolicy,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `policy` for `pattern`, replacing any earlier one
    pub fn register(&mut self, pattern: impl Into<String>, policy: HandlerPolicy) -> &mut Self {
        self.policies.insert(pattern.into(), policy);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, pattern: impl Into<String>, policy: HandlerPolicy) -> Self {
        self.register(pattern, policy);
        self
    }

    /// Policy for a matched pattern. Unmatched or unregistered patterns get
    /// the default policy.
    pub fn get(&self, pattern: Option<&str>) -> &HandlerPolicy {
        pattern
            .and_then(|p| self.policies.get(p))
            .unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
