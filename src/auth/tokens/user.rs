//! User tokens

use super::types::{USER_NONCE_LEN, UserClaims};
use crate::auth::sig::Signer;
use crate::utils::auth::crypto::keys::random_bytes;
use crate::utils::error::Result;
use base64::{Engine as _, engine::general_purpose};
use std::time::Duration;
use tracing::debug;

/// Issue a token asserting `user`, valid for `ttl`
///
/// The username is taken as is; validating it is the account store's job.
pub fn new_user_token(signer: &Signer, user: &str, ttl: Duration) -> Result<String> {
    let claims = UserClaims {
        user: user.to_string(),
        random: general_purpose::STANDARD.encode(random_bytes(USER_NONCE_LEN)?),
    };
    let payload = serde_json::to_vec(&claims)?;
    let token = signer.sign(&payload, ttl)?;

    debug!("Issued user token for {:?}", user);
    Ok(token)
}

/// Verify a user token and decode its claims
pub fn parse_user_token(signer: &Signer, token: &str) -> Option<UserClaims> {
    let payload = signer.verify(token)?;
    serde_json::from_slice(&payload).ok()
}

/// The username inside a valid token, or `""` if the token does not verify.
/// An empty string always means "not authenticated".
pub fn extract_user(signer: &Signer, token: &str) -> String {
    parse_user_token(signer, token)
        .map(|claims| claims.user)
        .unwrap_or_default()
}
