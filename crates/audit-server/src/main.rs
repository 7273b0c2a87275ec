//! Audit Service - HTTP API with a forensic audit trail
//!
//! Every request through the server is intercepted, captured, timed,
//! and persisted to the audit log store.

use anyhow::Result;
use audit_core::{config::ServerConfig, AuditConfig, SqliteAuditStore};
use audit_server::{create_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Starting Audit Service v{}", env!("CARGO_PKG_VERSION"));

    let server = load_server_config();
    let audit = load_audit_config();

    let database_url = std::env::var("AUDIT_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:audit.db?mode=rwc".to_string());
    let store = SqliteAuditStore::new(&database_url).await?;

    let state = AppState::new(audit, Arc::new(store));

    // Build router with middleware
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server; connect-info is what gives the interceptor peer
    // addresses when no proxy header is present
    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn load_server_config() -> ServerConfig {
    ServerConfig {
        host: std::env::var("AUDIT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("AUDIT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
    }
}

fn load_audit_config() -> AuditConfig {
    let mut config = AuditConfig::default();

    if let Ok(paths) = std::env::var("AUDIT_EXCLUDED_PATHS") {
        config.excluded_paths = paths
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
    }

    if let Ok(cap) = std::env::var("AUDIT_MAX_BODY") {
        if let Ok(cap) = cap.parse() {
            config.max_captured_body = cap;
        }
    }

    config
}
