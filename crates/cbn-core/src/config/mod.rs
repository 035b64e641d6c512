//! Engine configuration with layered resolution.

pub mod defaults;
pub mod document_config;
pub mod engine_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use document_config::DocumentConfig;
pub use engine_config::EngineConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CBN_*`)
/// 2. Config file passed to [`CbnConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CbnConfig {
    pub engine: EngineConfig,
    pub document: DocumentConfig,
}

impl CbnConfig {
    /// Load configuration from an optional TOML file plus `CBN_*` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        Self::validate(&config)?;
        tracing::debug!(
            file = ?path,
            max_parents = config.engine.max_parents,
            max_terms = config.engine.max_terms,
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CBN_MAX_PARENTS`, `CBN_MAX_TERMS` and `CBN_DEFAULT_PRIOR`
    /// using `lookup` to read variables.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("CBN_MAX_PARENTS") {
            self.engine.max_parents = parse_env("CBN_MAX_PARENTS", &raw)?;
        }
        if let Some(raw) = lookup("CBN_MAX_TERMS") {
            self.engine.max_terms = parse_env("CBN_MAX_TERMS", &raw)?;
        }
        if let Some(raw) = lookup("CBN_DEFAULT_PRIOR") {
            self.document.default_prior = parse_env("CBN_DEFAULT_PRIOR", &raw)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(config: &CbnConfig) -> Result<(), ConfigError> {
        if config.engine.max_parents == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "engine.max_parents".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.engine.max_terms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "engine.max_terms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&config.document.default_prior) {
            return Err(ConfigError::ValidationFailed {
                field: "document.default_prior".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.document.clone_offset.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "document.clone_offset".to_string(),
                message: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: field.to_string(),
        message: e.to_string(),
    })
}
