//! Envelope signing and verification

use super::types::{Secret, SignedEnvelope, Signer};
use crate::utils::auth::crypto::hmac::{create_hmac_tag, verify_hmac_tag};
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

impl Signer {
    /// Create a signer holding the given secret
    pub fn new(secret: impl Into<Secret>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Sign `payload`, expiring after `ttl`. A zero `ttl` never expires.
    pub fn sign(&self, payload: &[u8], ttl: Duration) -> Result<String> {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            let ttl = chrono::Duration::from_std(ttl)
                .map_err(|_| GatewayError::internal(format!("TTL out of range: {:?}", ttl)))?;
            let at = Utc::now()
                .checked_add_signed(ttl)
                .ok_or_else(|| GatewayError::internal("TTL overflows the clock"))?;
            Some(at)
        };
        self.sign_until(payload, expires_at)
    }

    /// Sign `payload` with an absolute expiry
    ///
    /// An expiry at the Unix epoch is refused, as it would encode as "never".
    pub fn sign_until(&self, payload: &[u8], expires_at: Option<DateTime<Utc>>) -> Result<String> {
        if expires_at.is_some_and(|t| t.timestamp_micros() == 0) {
            return Err(GatewayError::internal("Expiry encodes as never expiring"));
        }
        let expiry = SignedEnvelope::encode_expiry(expires_at);
        let signature = create_hmac_tag(self.secret.expose(), &[payload, &expiry[..]])?;

        Ok(SignedEnvelope {
            payload: payload.to_vec(),
            expiry,
            signature,
        }
        .encode())
    }

    /// Verify a token and return its payload
    ///
    /// Returns `None` for malformed, forged or expired tokens alike. The MAC is
    /// checked even when the expiry has already passed.
    pub fn verify(&self, token: &str) -> Option<Vec<u8>> {
        let envelope = SignedEnvelope::decode(token)?;

        let authentic = verify_hmac_tag(
            self.secret.expose(),
            &[envelope.payload.as_slice(), &envelope.expiry[..]],
            &envelope.signature,
        );
        let live = envelope.is_live_at(Utc::now());

        if authentic && live {
            Some(envelope.payload)
        } else {
            None
        }
    }

    /// Shortcut for `verify(token).is_some()`
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_some()
    }
}
