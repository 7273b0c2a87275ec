//! Audit Core - record model and log store
//!
//! This crate provides:
//! - The audit record and its two-phase builder
//! - Body capture policy (size cap, sentinel, path exclusions)
//! - The log store trait and its SQLite implementation

pub mod config;
pub mod record;
pub mod store;

pub use config::AuditConfig;
pub use record::{bounded_body, AuditRecord, RecordDraft, RequestMeta, BODY_SENTINEL};
pub use store::{AuditLogRow, AuditStore, SqliteAuditStore, StoreError, StoreResult};
