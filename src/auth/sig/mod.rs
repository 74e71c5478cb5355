//! Signed, optionally expiring envelopes
//!
//! An envelope is `base64(payload):base64(expiry):base64(hmac)`, where the HMAC
//! covers the payload and the expiry bytes. Anyone holding the secret can check
//! that the payload was issued by this service and has not expired, without
//! any server side state.

mod signer;
pub mod types;


pub use types::{Secret, SignedEnvelope, Signer};
