//! Audit Server - HTTP API with a forensic audit trail
//!
//! This crate provides:
//! - The audit interceptor middleware (body capture, response tap,
//!   timing, persistence)
//! - Identity resolution from request extensions
//! - Health and audit-record read endpoints

pub mod api;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod state;

pub use api::create_router;
pub use state::AppState;
