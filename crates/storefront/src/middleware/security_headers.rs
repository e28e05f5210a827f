//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive headers to every response. Product images come from the
//! commerce API's CDN, so images are the one source allowed off-site.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Headers that do not depend on the request.
fn static_headers() -> [(HeaderName, &'static str); 6] {
    [
        (X_FRAME_OPTIONS, "DENY"),
        (X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (REFERRER_POLICY, "no-referrer"),
        (CACHE_CONTROL, "no-store, max-age=0"),
        (
            HeaderName::from_static("permissions-policy"),
            "camera=(), geolocation=(), microphone=(), payment=(), usb=()",
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            "same-origin",
        ),
    ]
}

/// Build the `Content-Security-Policy` value.
///
/// ```text
/// default-src 'none';
/// script-src 'self' 'nonce-<nonce>';
/// style-src 'self';
/// img-src 'self' https: data:;
/// form-action 'self';
/// base-uri 'self';
/// frame-ancestors 'none'
/// ```
#[must_use]
pub fn content_security_policy(nonce: Option<&str>) -> String {
    let script_src = match nonce {
        Some(nonce) if !nonce.is_empty() => format!("'self' 'nonce-{nonce}'"),
        _ => "'self'".to_string(),
    };
    format!(
        "default-src 'none'; \
         script-src {script_src}; \
         style-src 'self'; \
         img-src 'self' https: data:; \
         form-action 'self'; \
         base-uri 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let nonce = request.extensions().get::<CspNonce>().cloned();
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in static_headers() {
        headers.insert(name, HeaderValue::from_static(value));
    }

    let policy = content_security_policy(nonce.as_ref().map(CspNonce::value));
    if let Ok(value) = HeaderValue::from_str(&policy) {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    }

    response
}
