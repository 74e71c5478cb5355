//! Per-request gating
//!
//! The [`Gatekeeper`] decides, from the policy registered for a route, how a
//! request is rate limited and whether it must carry a user token. It knows
//! nothing about HTTP frameworks; the server middleware feeds it a
//! [`GateRequest`] and charges the returned [`Admission`] once the handler has
//! run.

mod gatekeeper;
mod policy;
mod types;


pub use gatekeeper::Gatekeeper;
pub use policy::{AuthMethod, HandlerPolicy, PolicyRegistry};
pub use types::{Admission, AuthenticatedUser, GateRequest, GateSettings};
