//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_config() {
        let dir = std::env::temp_dir().join("merchant-edge-loader-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("edge.toml");
        fs::write(
            &path,
            r#"
[policy]
canonical_origin = "https://www.travelhub.example"
sandbox_suffixes = [".sandboxhost.example"]

[upstream]
address = "127.0.0.1:4000"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.upstream.address, "127.0.0.1:4000");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn rejects_invalid_config() {
        let dir = std::env::temp_dir().join("merchant-edge-loader-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        fs::write(&path, "[policy]\ncanonical_origin = \"not a url\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
