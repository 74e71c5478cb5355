//! Random key material drawn from the operating system

use crate::utils::error::{GatewayError, Result};
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::error;
use uuid::Uuid;

/// Fill a fresh buffer of `len` bytes from the OS random number generator
///
/// Fails with [`GatewayError::Entropy`] rather than falling back to a weaker
/// source.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        error!("OS random number generator failed: {}", e);
        GatewayError::entropy(e.to_string())
    })?;
    Ok(buf)
}

/// Generate a random (version 4) UUID from the OS random number generator
pub fn random_uuid() -> Result<Uuid> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        error!("OS random number generator failed: {}", e);
        GatewayError::entropy(e.to_string())
    })?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}

/// Generate a secret suitable for signing tokens, base64 encoded
pub fn generate_secret() -> Result<String> {
    Ok(general_purpose::STANDARD.encode(random_bytes(48)?))
}
