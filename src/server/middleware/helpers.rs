//! Helper functions for middleware

use crate::utils::error::{GatewayError, Result};
use crate::utils::net::resolve_client_addr;
use crate::utils::net::xff::FORWARDED_FOR_HEADER;
use actix_web::http::Uri;
use actix_web::http::header::HeaderMap;
use actix_web::http::uri::PathAndQuery;
use std::net::IpAddr;
use url::form_urlencoded;

/// Stand-in subject for requests without a peer address
pub const UNKNOWN_PEER: &str = "unknown";

/// Value of a header, if present and valid ASCII
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Address a request is rate limited by
///
/// Only the peer's IP counts, never its port. With `trust_forwarded_for` the
/// first public address in `X-Forwarded-For` replaces the peer's.
pub fn client_addr(peer: Option<IpAddr>, headers: &HeaderMap, trust_forwarded_for: bool) -> String {
    match peer {
        Some(ip) if trust_forwarded_for => {
            resolve_client_addr(ip, header_value(headers, FORWARDED_FOR_HEADER)).to_string()
        }
        Some(ip) => ip.to_string(),
        None => UNKNOWN_PEER.to_string(),
    }
}

/// Rewrite `uri` so that `param` carries `user` and nothing the client sent
///
/// Returns `None` when the URI needs no change. Other query pairs keep their
/// order.
pub fn rewrite_user_param(uri: &Uri, param: &str, user: Option<&str>) -> Result<Option<Uri>> {
    let query = uri.query().unwrap_or("");
    let supplied = form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == param);
    if !supplied && user.is_none() {
        return Ok(None);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if k != param {
            serializer.append_pair(&k, &v);
        }
    }
    if let Some(user) = user {
        serializer.append_pair(param, user);
    }
    let query = serializer.finish();

    let path_and_query = if query.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), query)
    };
    let path_and_query: PathAndQuery = path_and_query
        .parse()
        .map_err(|e| GatewayError::internal(format!("Bad rewritten URI: {}", e)))?;

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts)
        .map(Some)
        .map_err(|e| GatewayError::internal(format!("Bad rewritten URI: {}", e)))
}
