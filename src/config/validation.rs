//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the canonical origin parses and carries a host
//! - Check sandbox suffixes and excluded prefixes are well-formed
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, including on reload

use axum::http::uri::Authority;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("policy.canonical_origin {0:?} is not a valid URL")]
    InvalidCanonicalOrigin(String),

    #[error("policy.canonical_origin {0:?} must be http or https and carry a host")]
    CanonicalOriginNotHttp(String),

    #[error("policy.sandbox_suffixes entry {0:?} is not a valid domain suffix")]
    InvalidSandboxSuffix(String),

    #[error("policy.excluded_prefixes entry {0:?} must start with '/'")]
    InvalidExcludedPrefix(String),

    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address {0:?} is not a valid authority")]
    InvalidUpstreamAddress(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate an [`EdgeConfig`], collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.policy.canonical_origin) {
        Ok(origin) => {
            let scheme_ok = origin.scheme() == "http" || origin.scheme() == "https";
            if !scheme_ok || origin.host_str().is_none() {
                errors.push(ValidationError::CanonicalOriginNotHttp(
                    config.policy.canonical_origin.clone(),
                ));
            }
        }
        Err(_) => {
            errors.push(ValidationError::InvalidCanonicalOrigin(
                config.policy.canonical_origin.clone(),
            ));
        }
    }

    for suffix in &config.policy.sandbox_suffixes {
        let bare = suffix.trim().trim_start_matches('.');
        if bare.is_empty() || bare.contains(char::is_whitespace) || bare.contains('/') {
            errors.push(ValidationError::InvalidSandboxSuffix(suffix.clone()));
        }
    }

    for prefix in &config.policy.excluded_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidExcludedPrefix(prefix.clone()));
        }
    }

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.address.parse::<Authority>().is_err() {
        errors.push(ValidationError::InvalidUpstreamAddress(
            config.upstream.address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&EdgeConfig::default()), Ok(()));
    }

    #[test]
    fn rejects_unparseable_canonical_origin() {
        let mut config = EdgeConfig::default();
        config.policy.canonical_origin = "not a url".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidCanonicalOrigin(_)
        ));
    }

    #[test]
    fn rejects_origin_without_http_host() {
        let mut config = EdgeConfig::default();
        config.policy.canonical_origin = "file:///tmp/site".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::CanonicalOriginNotHttp(_)
        ));
    }

    #[test]
    fn rejects_empty_sandbox_suffix() {
        let mut config = EdgeConfig::default();
        config.policy.sandbox_suffixes.push(".".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidSandboxSuffix(_)));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = EdgeConfig::default();
        config.policy.canonical_origin = "::".into();
        config.policy.excluded_prefixes.push("no-slash".into());
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
