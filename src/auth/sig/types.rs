//! Signing types and the envelope wire format

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Separator between envelope segments; never part of the base64 alphabet
pub const SEGMENT_SEPARATOR: char = ':';

/// Shared signing secret
///
/// Cheap to clone; the bytes are never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Arc<[u8]>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::from(bytes.into()))
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Signs and verifies envelopes with a single secret
#[derive(Clone, Debug)]
pub struct Signer {
    pub(super) secret: Secret,
}

/// A decoded but not yet verified envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    /// Opaque signed data
    pub payload: Vec<u8>,
    /// Raw expiry segment, exactly as it was signed
    pub expiry: [u8; 8],
    /// HMAC over `payload || expiry`
    pub signature: Vec<u8>,
}

impl SignedEnvelope {
    /// Encode an expiry as big-endian Unix microseconds, zero meaning "never"
    pub fn encode_expiry(expires_at: Option<DateTime<Utc>>) -> [u8; 8] {
        expires_at
            .map(|t| t.timestamp_micros())
            .unwrap_or(0)
            .to_be_bytes()
    }

    /// Whether the envelope is within its lifetime at `now`. An out of range
    /// expiry is never live.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        match i64::from_be_bytes(self.expiry) {
            0 => true,
            micros => DateTime::from_timestamp_micros(micros).is_some_and(|at| now <= at),
        }
    }

    /// Serialize to `base64(payload):base64(expiry):base64(signature)`
    pub fn encode(&self) -> String {
        let engine = &general_purpose::STANDARD;
        format!(
            "{}{sep}{}{sep}{}",
            engine.encode(&self.payload),
            engine.encode(self.expiry),
            engine.encode(&self.signature),
            sep = SEGMENT_SEPARATOR
        )
    }

    /// Parse the wire format. Anything other than exactly three well-formed
    /// segments yields `None`.
    pub fn decode(token: &str) -> Option<Self> {
        let engine = &general_purpose::STANDARD;
        let mut segments = token.split(SEGMENT_SEPARATOR);
        let payload = engine.decode(segments.next()?).ok()?;
        let expiry = engine.decode(segments.next()?).ok()?;
        let signature = engine.decode(segments.next()?).ok()?;
        if segments.next().is_some() {
            return None;
        }

        Some(Self {
            payload,
            expiry: expiry.try_into().ok()?,
            signature,
        })
    }
}
