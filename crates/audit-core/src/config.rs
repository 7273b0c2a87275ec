//! Audit configuration types

use serde::{Deserialize, Serialize};

/// Capture policy configuration
///
/// Read-only after startup; shared across requests behind an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Maximum number of body bytes recorded before the capture is
    /// replaced by the sentinel marker
    #[serde(default = "default_max_captured_body")]
    pub max_captured_body: usize,
    /// Path prefixes for which request-body capture is skipped
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

fn default_max_captured_body() -> usize {
    1000
}

fn default_excluded_paths() -> Vec<String> {
    vec!["/api/v1/upload".to_string()]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_captured_body: default_max_captured_body(),
            excluded_paths: default_excluded_paths(),
        }
    }
}

impl AuditConfig {
    /// Whether request-body capture is disabled for this path
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_paths.iter().any(|p| path.starts_with(p))
    }
}

/// Server configuration for the audit service binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_from_empty_object() {
        let config: AuditConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_captured_body, 1000);
        assert_eq!(config.excluded_paths, vec!["/api/v1/upload".to_string()]);
    }

    #[test]
    fn exclusion_is_prefix_match() {
        let config = AuditConfig::default();
        assert!(config.is_excluded("/api/v1/upload"));
        assert!(config.is_excluded("/api/v1/upload/file"));
        assert!(!config.is_excluded("/api/v1/users"));
        assert!(!config.is_excluded("/other/api/v1/upload"));
    }

    #[test]
    fn custom_exclusions_override_defaults() {
        let config: AuditConfig =
            serde_json::from_str(r#"{"excluded_paths": ["/bulk"]}"#).unwrap();
        assert!(config.is_excluded("/bulk/import"));
        assert!(!config.is_excluded("/api/v1/upload"));
    }
}
