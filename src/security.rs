// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

//! Production request hardening.
//!
//! Three middlewares applied to the whole router: allowed-host enforcement,
//! HTTPS redirect for requests that arrived over plain HTTP, and the
//! security response headers. TLS terminates at the fronting proxy; the
//! proxy marks TLS requests with `X-Forwarded-Proto: https`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, state::AppState};

/// Proxy header naming the original request scheme.
pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Reject requests whose `Host` header is not in the allowed list.
pub async fn enforce_allowed_hosts(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port)
        .is_some_and(|host| state.config.allowed_hosts.iter().any(|a| a == host));

    if allowed {
        next.run(request).await
    } else {
        ApiError::bad_request("disallowed host").into_response()
    }
}

/// Redirect plain-HTTP requests to the same URL over HTTPS.
pub async fn redirect_to_https(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.security.ssl_redirect || is_secure(&request) {
        return next.run(request).await;
    }

    // Host has already passed `enforce_allowed_hosts` at this point.
    let Some(host) = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
    else {
        return ApiError::bad_request("missing host").into_response();
    };
    let path = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());

    match HeaderValue::from_str(&format!("https://{host}{path}")) {
        Ok(location) => {
            let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(_) => ApiError::bad_request("invalid redirect target").into_response(),
    }
}

/// Attach the security response headers to every response, redirects and
/// rejections included.
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let security = &state.config.security;
    let headers = response.headers_mut();

    if security.hsts_seconds > 0 {
        if let Ok(value) = HeaderValue::from_str(&security.hsts_header_value()) {
            headers.insert(header::STRICT_TRANSPORT_SECURITY, value);
        }
    }
    if security.content_type_nosniff {
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
    }
    if security.browser_xss_filter {
        headers.insert(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        );
    }
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static(security.x_frame_options),
    );

    response
}

fn is_secure(request: &Request) -> bool {
    request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("https"))
}

/// Strip an optional `:port` suffix from a `Host` header value. IPv6
/// literals keep their brackets: `[::1]:8080` -> `[::1]`.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }
    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn strip_port_handles_names_and_literals() {
        assert_eq!(strip_port("your-domain.com"), "your-domain.com");
        assert_eq!(strip_port("your-domain.com:8080"), "your-domain.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }

    #[test]
    fn forwarded_proto_decides_secure() {
        let secure = Request::builder()
            .uri("/")
            .header(FORWARDED_PROTO, "https")
            .body(Body::empty())
            .unwrap();
        assert!(is_secure(&secure));

        let mixed_case = Request::builder()
            .uri("/")
            .header(FORWARDED_PROTO, " HTTPS ")
            .body(Body::empty())
            .unwrap();
        assert!(is_secure(&mixed_case));

        let plain = Request::builder()
            .uri("/")
            .header(FORWARDED_PROTO, "http")
            .body(Body::empty())
            .unwrap();
        assert!(!is_secure(&plain));

        let absent = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert!(!is_secure(&absent));
    }
}
