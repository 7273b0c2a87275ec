//! Response body tap

use axum::{body::Body, response::Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use tracing::warn;

/// Drain the outbound body into a buffer and rebuild the response
/// from the very same bytes.
///
/// Status, headers, and extensions are untouched; the client receives
/// byte-for-byte what the handler produced, including empty bodies.
/// A body read failure is logged and yields an empty capture.
pub async fn tap_response(response: Response) -> (Response, Bytes) {
    let (parts, body) = response.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            (
                Response::from_parts(parts, Body::from(bytes.clone())),
                bytes,
            )
        }
        Err(err) => {
            warn!(error = %err, "failed to read response body for audit capture");
            (Response::from_parts(parts, Body::empty()), Bytes::new())
        }
    }
}
