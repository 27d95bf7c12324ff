//! Client identity extraction for admission control.
//!
//! Identity is the network-level originating address; there is no
//! authentication layer. When the service sits behind a trusted reverse
//! proxy the peer socket address is the proxy, so the forwarding headers
//! are consulted instead.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Resolves the client identifier used as the rate-window key.
///
/// With `behind_proxy` set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`, then the peer address. Enable `behind_proxy` only when the
/// headers come from a trusted proxy, otherwise clients can spoof their
/// identity and bypass the quota.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first) = forwarded.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }

        if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            let real_ip = real_ip.trim();
            if !real_ip.is_empty() {
                return real_ip.to_string();
            }
        }
    }

    peer.ip().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "192.0.2.1:4242".parse().unwrap()
    }

    #[test]
    fn test_uses_peer_address_by_default() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer(), false), "192.0.2.1");
    }

    #[test]
    fn test_ignores_headers_when_not_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_ip(&headers, peer(), false), "192.0.2.1");
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers, peer(), true), "203.0.113.9");
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_ip(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_empty_forwarded_for_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_ip(&headers, peer(), true), "192.0.2.1");
    }
}
