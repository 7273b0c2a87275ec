//! Audit interception middleware
//!
//! One audit record per request: pre-handler fields are snapshotted
//! before the downstream chain runs, post-handler fields are filled in
//! once it returns, and the finished record is persisted exactly once.
//! No failure inside this pipeline ever becomes the request's response.

use std::time::Instant;

use audit_core::{bounded_body, AuditRecord, AuditStore, RecordDraft, RequestMeta};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::error;

use super::{capture, tap};
use crate::identity;
use crate::state::AppState;

/// Handler-reported error, attached to a response as an extension so
/// the interceptor can record it without disturbing what the client
/// sees.
#[derive(Debug, Clone)]
pub struct HandlerError(pub String);

/// The audit interceptor.
///
/// Installed with `axum::middleware::from_fn_with_state`; calls the
/// downstream chain exactly once and measures only its execution
/// window.
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let meta = request_meta(&request);
    let (request, request_body) = capture::capture_request_body(&state.config, request).await;
    let user_id = identity::resolve_user_id(&request);
    let draft = RecordDraft::begin(meta, user_id, request_body);

    let start = Instant::now();
    let response = next.run(request).await;
    let latency = start.elapsed();

    let status = response.status().as_u16();
    let error_message = response
        .extensions()
        .get::<HandlerError>()
        .map(|e| e.0.clone())
        .unwrap_or_default();
    let (response, response_body) = tap::tap_response(response).await;

    let record = draft.finalize(
        status,
        latency,
        error_message,
        bounded_body(&response_body, state.config.max_captured_body),
    );
    persist_record(state.store.as_ref(), &record).await;

    response
}

/// Snapshot the request metadata available before the handler runs
fn request_meta(request: &Request) -> RequestMeta {
    let remote_addr = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    RequestMeta {
        remote_addr,
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        user_agent,
    }
}

/// Hand the finished record to the log store; a failed create is
/// logged and dropped, never surfaced to the client.
async fn persist_record(store: &dyn AuditStore, record: &AuditRecord) {
    if let Err(err) = store.create(record).await {
        error!(
            error = %err,
            method = %record.method,
            path = %record.path,
            "failed to persist audit record"
        );
    }
}
