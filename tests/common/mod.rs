//! Common test utilities for shield-rs
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::TestGateway;
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let gateway = TestGateway::new();
//!     let token = gateway.api_token();
//!     // ...
//! }
//! ```


pub use fixtures::TestGateway;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}
