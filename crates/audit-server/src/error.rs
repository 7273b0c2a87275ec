//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::middleware::HandlerError;

/// Errors surfaced by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("storage error: {0}")]
    Storage(#[from] audit_core::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, message.clone()).into_response();
        // Surface the error to the audit interceptor without changing
        // what the client receives
        response.extensions_mut().insert(HandlerError(message));
        response
    }
}
