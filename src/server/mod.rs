//! HTTP server implementation
//!
//! This module provides the HTTP server, the request gate middleware and the
//! built-in routes.

pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;


pub use builder::ServerBuilder;
pub use server::HttpServer;
pub use state::AppState;
