//! Error types for the gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
///
/// The first group of variants are the expected, client-caused outcomes of the
/// request gate. Everything below them is an internal failure that is logged
/// server side and surfaced to the client only as "unknown problem".
#[derive(Error, Debug)]
pub enum GatewayError {
    /// An auth or rate-limit feature was used but no secret is configured
    #[error("secret not set on server")]
    SecretNotSet,

    /// The endpoint requires an api token and none was sent
    #[error("api token missing")]
    TokenMissing,

    /// The api token failed structure or signature verification
    #[error("api token invalid")]
    TokenInvalid,

    /// The api token is valid but older than the configured max age
    #[error("api token expired")]
    TokenExpired,

    /// The caller's time bucket is empty or in debt
    #[error("rate limited")]
    RateLimited,

    /// The endpoint requires a user token and none was sent
    #[error("user token missing")]
    UserTokenMissing,

    /// The user token failed verification
    #[error("user token invalid")]
    UserTokenInvalid,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The operating system's random number generator failed. Nothing issued
    /// without it can be trusted, so this is never treated as a client error.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
