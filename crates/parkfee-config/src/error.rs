//! # Config Error Types
//!
//! Error types for loading and saving tariff configuration.

use std::path::PathBuf;

use parkfee_core::ValidationError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong between a `parkfee.toml` and a usable tariff.
#[derive(Debug, Error)]
pub enum ConfigError {
    // =========================================================================
    // Load / Save Errors
    // =========================================================================
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    // =========================================================================
    // Content Errors
    // =========================================================================
    /// A value (file or environment) could not be interpreted.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// A tariff failed validation.
    #[error("Invalid tariff: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup of an unknown carpark id.
    #[error("Carpark not found: {0}")]
    CarparkNotFound(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "Config file not found: /tmp/missing.toml");

        let err = ConfigError::InvalidValue {
            key: "PARKFEE_TRACE_RULES".to_string(),
            reason: "expected true or false".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for PARKFEE_TRACE_RULES: expected true or false"
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: ConfigError = ValidationError::Required {
            field: "carpark.id".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid tariff: carpark.id is required");
    }
}
