//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! tier. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge tier.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Host-classification and interception policy.
    pub policy: PolicyConfig,

    /// Upstream application origin that serves passed-through traffic.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Host-classification policy.
///
/// The canonical origin is the single production origin that search engines
/// should index; sandbox suffixes identify preview/staging deployments on
/// the shared hosting provider's subdomain scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Full canonical origin, scheme included (e.g., "https://www.travelhub.example").
    pub canonical_origin: String,

    /// Domain suffixes that mark a host as a sandbox deployment.
    /// Matched as exact dot-boundary suffixes, never as substrings.
    pub sandbox_suffixes: Vec<String>,

    /// Path prefixes reserved for static/internal assets, never intercepted.
    pub excluded_prefixes: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            canonical_origin: "https://www.travelhub.example".to_string(),
            sandbox_suffixes: vec![".sandboxhost.example".to_string()],
            excluded_prefixes: vec![
                "/_edge/".to_string(),
                "/assets/".to_string(),
                "/static/".to_string(),
                "/favicon.ico".to_string(),
            ],
        }
    }
}

/// Upstream application origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Authority of the rendering origin (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
