use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use http::header;

/// Hardening headers applied to every response. The renderer serves only
/// same-origin assets, so the policy is strict self.
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self'; script-src 'self'";

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    response
}
