//! Middleware components

pub mod audit;
pub mod capture;
pub mod tap;

pub use audit::{audit_middleware, HandlerError};
