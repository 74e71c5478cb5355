//! Client address resolution behind reverse proxies
//!
//! When the gateway sits behind a load balancer the peer address is the
//! balancer's. The first public address listed in `X-Forwarded-For` is the
//! real caller.

use std::net::IpAddr;

/// Header carrying the proxy chain
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Whether an address can never be a real caller's public address
pub fn is_internal_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_loopback()
                || ipv4.is_private()
                || ipv4.is_link_local()
                || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // Unique local (fc00::/7)
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
                // Link-local (fe80::/10)
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
                || ipv6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_internal_ip(&IpAddr::V4(v4)))
        }
    }
}

fn parse_forwarded_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(raw);
    raw.parse().ok()
}

/// Returns the first public address in an `X-Forwarded-For` value
pub fn first_public_ip(forwarded_for: &str) -> Option<IpAddr> {
    forwarded_for
        .split(',')
        .filter_map(parse_forwarded_ip)
        .find(|ip| !is_internal_ip(ip))
}

/// Resolve the address to rate limit by
///
/// `peer` is the socket peer's address. If a forwarded header names a public
/// address, that address replaces it. The result never carries a port, so all
/// connections from one host share a subject.
pub fn resolve_client_addr(peer: IpAddr, forwarded_for: Option<&str>) -> IpAddr {
    forwarded_for.and_then(first_public_ip).unwrap_or(peer)
}
