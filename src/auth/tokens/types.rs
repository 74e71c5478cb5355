//! Token payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifetime of a freshly issued user token
pub const DEFAULT_USER_TOKEN_TTL: Duration = Duration::from_secs(48 * 60 * 60);

/// Number of random bytes in a user token nonce
pub const USER_NONCE_LEN: usize = 32;

/// Payload of an anonymous quota token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaClaims {
    /// Random identifier of the bucket
    pub uuid: Uuid,
    /// Issue time, used for the limiter's max age check
    #[serde(rename = "ts")]
    pub issued_at: DateTime<Utc>,
}

impl QuotaClaims {
    /// Age of the token at `now`; zero for tokens issued in the future
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.issued_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Payload of a user token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user: String,
    /// Base64 nonce making tokens for the same user unlinkable
    pub random: String,
}
