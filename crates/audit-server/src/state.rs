//! Application state

use audit_core::{AuditConfig, AuditStore};
use std::sync::Arc;

/// Shared application state
///
/// The interceptor is handed its collaborators here; it never reaches
/// into ambient globals. Both handles are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AuditConfig>,
    pub store: Arc<dyn AuditStore>,
}

impl AppState {
    pub fn new(config: AuditConfig, store: Arc<dyn AuditStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
