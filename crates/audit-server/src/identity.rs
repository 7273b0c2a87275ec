//! Authenticated-user identity for audit records

use axum::extract::Request;

/// Authenticated user id, inserted as a request extension by an
/// upstream authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

/// Resolve the authenticated user for a request.
///
/// Returns 0 for unauthenticated or unknown callers; absence of
/// identity is not an error. Never negative.
pub fn resolve_user_id(request: &Request) -> i64 {
    request
        .extensions()
        .get::<UserId>()
        .map(|u| u.0.max(0))
        .unwrap_or(0)
}
