//! Mapping configuration
//!
//! Controls how builders assemble descriptors. Loaded from TOML:
//!
//! ```toml
//! arity = "lenient"
//! warn_on_unused_parameters = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a functional strategy treats argument-count mismatches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityPolicy {
    /// Reject arrays whose length differs from the parameter-name count
    #[default]
    Strict,
    /// Pass any array through to the factory
    Lenient,
}

/// Builder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Arity policy for functional strategies
    pub arity: ArityPolicy,
    /// Log a warning when a no-args descriptor is built with parameter names
    pub warn_on_unused_parameters: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            arity: ArityPolicy::Strict,
            warn_on_unused_parameters: true,
        }
    }
}

impl MappingConfig {
    /// Parse a configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MappingConfig::default();
        assert_eq!(config.arity, ArityPolicy::Strict);
        assert!(config.warn_on_unused_parameters);
    }

    #[test]
    fn test_parse_config() {
        let config = MappingConfig::from_toml_str(
            r#"
            arity = "lenient"
            warn_on_unused_parameters = false
            "#,
        )
        .unwrap();

        assert_eq!(config.arity, ArityPolicy::Lenient);
        assert!(!config.warn_on_unused_parameters);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = MappingConfig::from_toml_str("").unwrap();
        assert_eq!(config, MappingConfig::default());
    }

    #[test]
    fn test_parse_invalid_policy() {
        let err = MappingConfig::from_toml_str(r#"arity = "sometimes""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
