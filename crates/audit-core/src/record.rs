//! Audit record and its two-phase builder

use std::time::Duration;

/// Marker stored in place of a body that exceeds the capture cap
pub const BODY_SENTINEL: &str = "BIG DATA";

/// Produce the recorded form of a captured body.
///
/// Bodies over `cap` bytes are replaced wholesale by [`BODY_SENTINEL`];
/// truncated raw bytes are never stored. Non-UTF-8 input is recorded
/// lossily.
pub fn bounded_body(bytes: &[u8], cap: usize) -> String {
    if bytes.len() > cap {
        BODY_SENTINEL.to_string()
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Request metadata available before the handler runs
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub remote_addr: String,
    pub method: String,
    pub path: String,
    pub user_agent: String,
}

/// Pre-handler half of an audit record.
///
/// Created when the interceptor begins processing a request and
/// consumed by [`RecordDraft::finalize`] once the handler chain has
/// returned. Consuming `self` makes finalizing twice a compile error
/// rather than a runtime one.
#[derive(Debug)]
pub struct RecordDraft {
    remote_addr: String,
    method: String,
    path: String,
    user_agent: String,
    request_body: String,
    user_id: i64,
}

impl RecordDraft {
    /// Snapshot the pre-handler fields
    pub fn begin(meta: RequestMeta, user_id: i64, request_body: String) -> Self {
        Self {
            remote_addr: meta.remote_addr,
            method: meta.method,
            path: meta.path,
            user_agent: meta.user_agent,
            request_body,
            user_id,
        }
    }

    /// Complete the record with the post-handler fields
    pub fn finalize(
        self,
        status: u16,
        latency: Duration,
        error_message: String,
        response_body: String,
    ) -> AuditRecord {
        AuditRecord {
            remote_addr: self.remote_addr,
            method: self.method,
            path: self.path,
            user_agent: self.user_agent,
            request_body: self.request_body,
            user_id: self.user_id,
            status,
            latency,
            error_message,
            response_body,
        }
    }
}

/// One finalized audit record, persisted exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub remote_addr: String,
    pub method: String,
    pub path: String,
    pub user_agent: String,
    pub request_body: String,
    pub user_id: i64,
    pub status: u16,
    pub latency: Duration,
    pub error_message: String,
    pub response_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> RequestMeta {
        RequestMeta {
            remote_addr: "10.0.0.1:4242".to_string(),
            method: "POST".to_string(),
            path: "/api/v1/projects".to_string(),
            user_agent: "curl/8.5".to_string(),
        }
    }

    #[test]
    fn bounded_body_keeps_small_bodies_verbatim() {
        assert_eq!(bounded_body(b"hello", 1000), "hello");
        assert_eq!(bounded_body(b"", 1000), "");
    }

    #[test]
    fn bounded_body_at_cap_is_kept() {
        let body = vec![b'x'; 1000];
        assert_eq!(bounded_body(&body, 1000), "x".repeat(1000));
    }

    #[test]
    fn bounded_body_over_cap_is_sentinel_not_prefix() {
        let body = vec![b'x'; 1001];
        let recorded = bounded_body(&body, 1000);
        assert_eq!(recorded, BODY_SENTINEL);
        assert!(!recorded.starts_with("xx"));
    }

    #[test]
    fn bounded_body_is_lossy_for_invalid_utf8() {
        let recorded = bounded_body(&[0xff, 0xfe], 1000);
        assert!(!recorded.is_empty());
    }

    #[test]
    fn finalize_assembles_both_halves() {
        let draft = RecordDraft::begin(meta(), 7, "{\"name\":\"a\"}".to_string());
        let record = draft.finalize(
            201,
            Duration::from_millis(12),
            String::new(),
            "{\"id\":1}".to_string(),
        );

        assert_eq!(record.remote_addr, "10.0.0.1:4242");
        assert_eq!(record.method, "POST");
        assert_eq!(record.path, "/api/v1/projects");
        assert_eq!(record.user_agent, "curl/8.5");
        assert_eq!(record.user_id, 7);
        assert_eq!(record.request_body, "{\"name\":\"a\"}");
        assert_eq!(record.status, 201);
        assert_eq!(record.latency, Duration::from_millis(12));
        assert!(record.error_message.is_empty());
        assert_eq!(record.response_body, "{\"id\":1}");
    }

    #[test]
    fn finalize_records_handler_error_and_status_independently() {
        let record = RecordDraft::begin(meta(), 0, String::new()).finalize(
            500,
            Duration::ZERO,
            "storage error: disk full".to_string(),
            String::new(),
        );
        assert_eq!(record.status, 500);
        assert_eq!(record.error_message, "storage error: disk full");
    }
}
