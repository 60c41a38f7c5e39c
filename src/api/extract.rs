//! Request extractors shared by handlers.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::utils::client_ip::extract_client_ip;

/// Client IP used as the rate limit bucket key.
///
/// Resolved from `X-Forwarded-For`, `X-Real-IP`, then the peer address. The
/// peer address is only present when the server was started with
/// `into_make_service_with_connect_info`; without it, and without headers,
/// the key is the empty string. Extraction never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(extract_client_ip(&parts.headers, remote_addr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        ip
    }

    #[tokio::test]
    async fn test_prefers_forwarded_header() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "1.2.3.4, 10.0.0.1")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([9, 9, 9, 9], 4000))));

        assert_eq!(extract(request).await, "1.2.3.4");
    }

    #[tokio::test]
    async fn test_falls_back_to_connect_info() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([9, 9, 9, 9], 4000))));

        assert_eq!(extract(request).await, "9.9.9.9");
    }

    #[tokio::test]
    async fn test_nothing_resolves_to_empty() {
        let request = Request::builder().body(()).unwrap();

        assert_eq!(extract(request).await, "");
    }
}
