//! API routes

pub mod health;
pub mod records;
pub mod upload;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::middleware::audit_middleware;
use crate::state::AppState;

/// Create the main API router with the audit interceptor installed
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/audit/records", get(records::recent_records))
        .route("/api/v1/upload/file", post(upload::upload_file))
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .with_state(state)
}
