//! Client IP extraction used as the quota bucket key.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the client IP for a request.
///
/// Sources are tried in order, first non-empty wins:
///
/// 1. `X-Forwarded-For` - first comma-separated entry, trimmed
/// 2. `X-Real-IP` - trimmed
/// 3. The peer socket address, without the port
///
/// Returns an empty string when nothing resolves. An empty string is still a
/// valid quota key, so this never fails. Header values that are not valid
/// UTF-8 are treated as absent.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "1.2.3.4, 5.6.7.8".parse().unwrap());
///
/// assert_eq!(extract_client_ip(&headers, None), "1.2.3.4");
/// ```
pub fn extract_client_ip(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> String {
    let forwarded = header_str(headers, X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or_default();
    if !forwarded.is_empty() {
        return forwarded.to_string();
    }

    let real_ip = header_str(headers, X_REAL_IP)
        .map(str::trim)
        .unwrap_or_default();
    if !real_ip.is_empty() {
        return real_ip.to_string();
    }

    remote_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
