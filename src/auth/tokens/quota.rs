//! Anonymous quota tokens

use super::types::QuotaClaims;
use crate::auth::sig::Signer;
use crate::utils::auth::crypto::keys::random_uuid;
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

/// Issue a new quota token. The envelope never expires; the rate limiter
/// enforces the max age from the embedded issue time.
pub fn new_quota_token(signer: &Signer) -> Result<String> {
    let claims = QuotaClaims {
        uuid: random_uuid()?,
        issued_at: Utc::now(),
    };
    let payload = serde_json::to_vec(&claims)?;
    let token = signer.sign(&payload, Duration::ZERO)?;

    debug!("Issued quota token {}", claims.uuid);
    Ok(token)
}

/// Verify a quota token and decode its claims
pub fn parse_quota_token(signer: &Signer, token: &str) -> Option<QuotaClaims> {
    let payload = signer.verify(token)?;
    serde_json::from_slice(&payload).ok()
}
