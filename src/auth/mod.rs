//! Stateless authentication
//!
//! Everything here is a pure function of a [`Signer`] and the wall clock. No
//! session state is kept on the server; a token carries all it asserts.

pub mod sig;
pub mod tokens;

pub use sig::{Secret, SignedEnvelope, Signer};
pub use tokens::{
    DEFAULT_USER_TOKEN_TTL, QuotaClaims, UserClaims, extract_user, new_quota_token,
    new_user_token, parse_quota_token,
};
