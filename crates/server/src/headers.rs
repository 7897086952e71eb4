use axum::Router;
use axum::http::{HeaderName, HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// Hosts the UI may frame besides the player embeds (trailers).
const EXTRA_FRAME_HOSTS: &[&str] = &["https://www.youtube.com"];

/// Content-Security-Policy allowing only our own origin plus the known
/// player embed hosts in frames.
pub fn content_security_policy() -> String {
    let mut frame_src = vec!["'self'".to_string()];
    frame_src.extend(EXTRA_FRAME_HOSTS.iter().map(|h| h.to_string()));
    for host in reelmix_players::embed_hosts() {
        if !frame_src.contains(&host) {
            frame_src.push(host);
        }
    }

    format!(
        "default-src 'self'; img-src 'self' data: https:; frame-src {}; frame-ancestors 'self'; base-uri 'self'; form-action 'self'",
        frame_src.join(" ")
    )
}

/// Attach the security headers to every response of `router`.
pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let csp = HeaderValue::from_str(&content_security_policy()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid CSP value, falling back to self only");
        HeaderValue::from_static("default-src 'self'")
    });

    router
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
        ))
}
