//! Gate request and outcome types

use serde::{Deserialize, Serialize};

/// What the gate needs to know about a request
#[derive(Debug, Clone, Copy, Default)]
pub struct GateRequest<'a> {
    /// HTTP method, upper case
    pub method: &'a str,
    /// Client address used for address based limiting
    pub remote_addr: &'a str,
    pub api_token: Option<&'a str>,
    pub user_token: Option<&'a str>,
}

/// A request that passed the gate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Admission {
    /// Bucket to charge the handling time to
    pub subject: Option<String>,
    /// Verified username, never empty
    pub user: Option<String>,
}

/// Verified username attached to a request's extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Request surface of the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    /// Header carrying the api (quota) token
    pub api_token_header: String,
    /// Header carrying the user token
    pub user_token_header: String,
    /// Query parameter the verified username is passed on in
    pub user_param: String,
    /// Take the client address from `X-Forwarded-For`
    pub trust_forwarded_for: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            api_token_header: "X-API-TOKEN".to_string(),
            user_token_header: "X-USER-TOKEN".to_string(),
            user_param: "_asUser".to_string(),
            trust_forwarded_for: false,
        }
    }
}
