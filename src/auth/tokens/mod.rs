//! Identity tokens built on signed envelopes
//!
//! Two kinds exist. Quota tokens are anonymous and only name a rate limit
//! bucket. User tokens carry a username and act as a stateless login session.

mod quota;
pub mod types;
mod user;


pub use quota::{new_quota_token, parse_quota_token};
pub use types::{DEFAULT_USER_TOKEN_TTL, QuotaClaims, USER_NONCE_LEN, UserClaims};
pub use user::{extract_user, new_user_token, parse_user_token};
