//! Bulk upload endpoint
//!
//! Lives under the default capture-exclusion prefix, so the audit
//! interceptor never buffers its payload.

use axum::Json;
use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub received: usize,
}

/// POST /api/v1/upload/file
pub async fn upload_file(body: Bytes) -> Json<UploadResponse> {
    Json(UploadResponse {
        received: body.len(),
    })
}
