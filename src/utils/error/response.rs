//! HTTP response handling for errors
//!
//! Every failure is rendered as a single plain-text line. Internal errors never
//! leak their text to the client.

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

/// Line sent for any failure that is not an expected gate rejection
pub const UNKNOWN_PROBLEM: &str = "unknown problem";

/// Non-standard status used for rate limited requests
pub fn rate_limited_status() -> StatusCode {
    StatusCode::from_u16(420).unwrap_or(StatusCode::TOO_MANY_REQUESTS)
}

impl GatewayError {
    /// The line of text sent back to the client for this error
    pub fn client_message(&self) -> String {
        if self.is_rejection() {
            self.to_string()
        } else {
            UNKNOWN_PROBLEM.to_string()
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::TokenMissing
            | GatewayError::TokenInvalid
            | GatewayError::TokenExpired
            | GatewayError::UserTokenMissing
            | GatewayError::UserTokenInvalid => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited => rate_limited_status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(format!("{}\n", self.client_message()))
    }
}
