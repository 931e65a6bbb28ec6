//! Client IP extraction from HTTP requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Determines the client IP address for a request.
///
/// When `behind_proxy` is set, the first entry of `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise (or when neither header is usable) the peer
/// socket address is used. Proxy headers are ignored unless the service runs
/// behind a trusted reverse proxy, since clients can forge them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
/// let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
///
/// assert_eq!(client_ip(&headers, peer, true), "203.0.113.7");
/// assert_eq!(client_ip(&headers, peer, false), "10.0.0.1");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|xff| xff.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}
