//! Audit record read API

use audit_core::AuditLogRow;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/v1/audit/records
///
/// Most recent audit records, newest first.
pub async fn recent_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<Vec<AuditLogRow>>, ApiError> {
    let rows = state.store.recent(query.limit).await?;
    Ok(Json(rows))
}
