//! Helper functions for creating and classifying errors

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn entropy<S: Into<String>>(message: S) -> Self {
        Self::Entropy(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error is an expected outcome of gating a request, as
    /// opposed to an internal failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::SecretNotSet
                | Self::TokenMissing
                | Self::TokenInvalid
                | Self::TokenExpired
                | Self::RateLimited
                | Self::UserTokenMissing
                | Self::UserTokenInvalid
        )
    }

    /// Whether the process can no longer provide its security guarantees
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Entropy(_))
    }
}
