//! HTTP middleware implementations
//!
//! The request gate runs in front of every route: it rate limits, checks
//! tokens and passes the verified user on to handlers.

mod gate;
mod helpers;


pub use gate::{RequestGate, RequestGateService};
pub use helpers::{UNKNOWN_PEER, client_addr, header_value, rewrite_user_param};
