//! Configuration file loading and parsing.

use std::path::Path;

use anyhow::{Context, Result};

use super::model::AlertConfig;
use crate::error::ConfigError;
use crate::validation::report::format_report;
use crate::validation::validate_config;

/// Loads the configuration file from disk and parses it.
pub fn load_from_path(path: &Path) -> Result<AlertConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(path, &content)
}

/// Parses YAML configuration content. An empty document yields the defaults.
pub fn parse(path: &Path, content: &str) -> Result<AlertConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(AlertConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Loads and fully validates the configuration file.
pub fn load_and_validate(path: &Path) -> Result<AlertConfig> {
    let config = load_from_path(path).context("Failed to load configuration")?;
    check(&config)?;
    Ok(config)
}

/// Validates an already loaded configuration, logging warnings.
pub fn check(config: &AlertConfig) -> Result<(), ConfigError> {
    let result = validate_config(config);

    for issue in result.warnings() {
        tracing::warn!(
            path = %issue.path,
            message = %issue.message,
            suggestion = ?issue.suggestion,
            "Config validation warning"
        );
    }

    if !result.is_valid() {
        tracing::error!("{}", format_report(&result));
        return Err(ConfigError::ValidationFailed {
            error_count: result.error_count(),
        });
    }

    Ok(())
}
