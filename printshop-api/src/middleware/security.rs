/// Security headers middleware
///
/// Adds hardening headers to every response:
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Cache-Control: no-store` on `/api/auth/*` (responses carry account data)
/// - `Strict-Transport-Security` when running in production
///
/// # Example
///
/// ```no_run
/// use axum::{middleware::from_fn_with_state, Router};
/// use printshop_api::middleware::security::{security_headers, SecurityPolicy};
///
/// let app: Router = Router::new()
///     .layer(from_fn_with_state(SecurityPolicy { hsts: true }, security_headers));
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Prefix of the account endpoints
const AUTH_PATH_PREFIX: &str = "/api/auth/";

/// Which optional headers to emit
#[derive(Debug, Clone, Copy)]
pub struct SecurityPolicy {
    /// Emit HSTS (only behind HTTPS)
    pub hsts: bool,
}

/// Axum middleware adding the security headers
pub async fn security_headers(
    State(policy): State<SecurityPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let no_store = request.uri().path().starts_with(AUTH_PATH_PREFIX);

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), policy, no_store);
    response
}

fn apply_headers(headers: &mut HeaderMap, policy: SecurityPolicy, no_store: bool) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if no_store {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if policy.hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        middleware::from_fn_with_state,
        routing::{get, post},
        Router,
    };
    use tower::Service as _;

    fn app(hsts: bool) -> Router {
        Router::new()
            .route("/test", get(|| async { "test" }))
            .route("/api/auth/login", post(|| async { "ok" }))
            .layer(from_fn_with_state(SecurityPolicy { hsts }, security_headers))
    }

    async fn headers_for(mut app: Router, method: &str, uri: &str) -> HeaderMap {
        let response = app
            .call(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.headers().clone()
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let headers = headers_for(app(false), "GET", "/test").await;

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(
            headers.get("Referrer-Policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
        assert!(headers.get("Cache-Control").is_none());
        assert!(headers.get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_enabled_in_production() {
        let headers = headers_for(app(true), "GET", "/test").await;
        assert!(headers.get("Strict-Transport-Security").is_some());
    }

    #[tokio::test]
    async fn test_auth_responses_not_cached() {
        let headers = headers_for(app(false), "POST", "/api/auth/login").await;
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
    }
}
