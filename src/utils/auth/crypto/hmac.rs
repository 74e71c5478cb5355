//! HMAC signature creation and verification over raw bytes

use crate::utils::error::{GatewayError, Result};
use hmac::{Hmac, Mac, digest::KeyInit as HmacKeyInit};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of every tag produced by [`create_hmac_tag`]
pub const TAG_LEN: usize = 32;

fn keyed(secret: &[u8], parts: &[&[u8]]) -> Result<HmacSha256> {
    let mut mac = <HmacSha256 as HmacKeyInit>::new_from_slice(secret)
        .map_err(|e| GatewayError::internal(format!("Invalid HMAC key: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac)
}

/// Create an HMAC-SHA256 tag over the concatenation of `parts`
pub fn create_hmac_tag(secret: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
    Ok(keyed(secret, parts)?.finalize().into_bytes().to_vec())
}

/// Verify an HMAC-SHA256 tag over the concatenation of `parts` in constant time
pub fn verify_hmac_tag(secret: &[u8], parts: &[&[u8]], tag: &[u8]) -> bool {
    match keyed(secret, parts) {
        Ok(mac) => mac.verify_slice(tag).is_ok(),
        Err(_) => false,
    }
}
