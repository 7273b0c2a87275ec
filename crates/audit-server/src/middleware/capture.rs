//! Non-destructive request body capture

use audit_core::{bounded_body, AuditConfig};
use axum::{body::Body, extract::Request};
use http_body_util::BodyExt;
use tracing::warn;

/// Read the inbound body and hand back a request whose body is an
/// identical buffered copy, so downstream extractors still see an
/// unconsumed stream.
///
/// Returns the bounded capture alongside the rebuilt request. Paths
/// matched by the exclusion predicate are not buffered at all and
/// yield an empty capture. A body read failure is soft: it is logged,
/// the capture stays empty, and the request proceeds.
pub async fn capture_request_body(config: &AuditConfig, request: Request) -> (Request, String) {
    if config.is_excluded(request.uri().path()) {
        return (request, String::new());
    }

    let (parts, body) = request.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            let captured = bounded_body(&bytes, config.max_captured_body);
            (Request::from_parts(parts, Body::from(bytes)), captured)
        }
        Err(err) => {
            warn!(error = %err, "failed to read request body for audit capture");
            (Request::from_parts(parts, Body::empty()), String::new())
        }
    }
}
