//! The gate's decision procedure

use super::policy::{HandlerPolicy, PolicyRegistry};
use super::types::{Admission, GateRequest, GateSettings};
use crate::auth::sig::Signer;
use crate::auth::tokens::{self, DEFAULT_USER_TOKEN_TTL};
use crate::core::rate_limiter::{RateLimiter, UseResult};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Combines the signer, the rate limiter and the route policies
///
/// Without a signer every token dependent check fails with
/// [`GatewayError::SecretNotSet`]; only address limited and open routes work.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    signer: Option<Signer>,
    limiter: Arc<RateLimiter>,
    policies: Arc<PolicyRegistry>,
    settings: GateSettings,
    user_token_ttl: Duration,
}

impl Gatekeeper {
    pub fn new(signer: Option<Signer>, limiter: Arc<RateLimiter>, policies: PolicyRegistry) -> Self {
        Self {
            signer,
            limiter,
            policies: Arc::new(policies),
            settings: GateSettings::default(),
            user_token_ttl: DEFAULT_USER_TOKEN_TTL,
        }
    }

    pub fn with_settings(mut self, settings: GateSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_user_token_ttl(mut self, ttl: Duration) -> Self {
        self.user_token_ttl = ttl;
        self
    }

    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    fn require_signer(&self) -> Result<&Signer> {
        self.signer.as_ref().ok_or(GatewayError::SecretNotSet)
    }

    /// Issue an api token for this gate's secret
    pub fn new_api_token(&self) -> Result<String> {
        tokens::new_quota_token(self.require_signer()?)
    }

    /// Issue a user token for this gate's secret
    pub fn new_user_token(&self, user: &str) -> Result<String> {
        tokens::new_user_token(self.require_signer()?, user, self.user_token_ttl)
    }

    /// Username in a user token, `""` if it does not verify or no secret is set
    pub fn user_from_token(&self, token: &str) -> String {
        match &self.signer {
            Some(signer) => tokens::extract_user(signer, token),
            None => String::new(),
        }
    }

    /// Run the checks for a request, failing on the first one that does not
    /// pass. Nothing is charged for a rejected request.
    pub async fn admit(&self, policy: &HandlerPolicy, req: &GateRequest<'_>) -> Result<Admission> {
        let subject = self.check_quota(policy, req).await?;
        let user = self.resolve_user(policy, req)?;

        debug!(
            "Admitted {} request (subject: {}, user: {})",
            req.method,
            subject.is_some(),
            user.as_deref().unwrap_or("-")
        );
        Ok(Admission { subject, user })
    }

    /// Charge the handling time of an admitted request
    pub async fn settle(&self, admission: &Admission, elapsed: Duration) -> Result<()> {
        if let Some(subject) = &admission.subject {
            let left = self.limiter.use_time(subject, elapsed).await?;
            debug!("Charged {:?}, {}ns left", elapsed, left);
        }
        Ok(())
    }

    async fn check_quota(
        &self,
        policy: &HandlerPolicy,
        req: &GateRequest<'_>,
    ) -> Result<Option<String>> {
        if policy.by_address_not_token {
            return match self.limiter.can_use_raw(req.remote_addr).await? {
                UseResult::Success => Ok(Some(req.remote_addr.to_string())),
                UseResult::RateLimited => {
                    warn!("Rate limited address {}", req.remote_addr);
                    Err(GatewayError::RateLimited)
                }
                other => Err(GatewayError::internal(format!(
                    "Unexpected {:?} for an address check",
                    other
                ))),
            };
        }

        if policy.token_not_required {
            return Ok(None);
        }

        let signer = self.require_signer()?;
        let token = req
            .api_token
            .filter(|t| !t.is_empty())
            .ok_or(GatewayError::TokenMissing)?;

        match self.limiter.can_use(token, signer).await? {
            UseResult::Success => Ok(Some(token.to_string())),
            UseResult::TokenInvalid => Err(GatewayError::TokenInvalid),
            UseResult::TokenExpired => Err(GatewayError::TokenExpired),
            UseResult::RateLimited => {
                warn!("Rate limited api token from {}", req.remote_addr);
                Err(GatewayError::RateLimited)
            }
        }
    }

    fn resolve_user(&self, policy: &HandlerPolicy, req: &GateRequest<'_>) -> Result<Option<String>> {
        let token = req.user_token.filter(|t| !t.is_empty());

        if policy.requires_user_auth(req.method) {
            let signer = self.require_signer()?;
            let token = token.ok_or(GatewayError::UserTokenMissing)?;
            let user = tokens::extract_user(signer, token);
            if user.is_empty() {
                return Err(GatewayError::UserTokenInvalid);
            }
            return Ok(Some(user));
        }

        // Not required: use it if it checks out, ignore it otherwise
        Ok(match (&self.signer, token) {
            (Some(signer), Some(token)) => {
                Some(tokens::extract_user(signer, token)).filter(|u| !u.is_empty())
            }
            _ => None,
        })
    }
}
