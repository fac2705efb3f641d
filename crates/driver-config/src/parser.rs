//! Configuration parser with environment variable substitution

use crate::{
    ConfigError, DriverConfig, Result,
    resolver::{ResolutionContext, resolve_env_vars},
};
use std::path::Path;

/// Parse a YAML configuration file, substituting from the process environment
pub fn parse_file(path: impl AsRef<Path>) -> Result<DriverConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse YAML configuration from a string, substituting from the process environment
pub fn parse_str(content: &str) -> Result<DriverConfig> {
    parse_str_with(content, &ResolutionContext::new())
}

/// Parse YAML configuration from a string, substituting from `context`
pub fn parse_str_with(content: &str, context: &ResolutionContext) -> Result<DriverConfig> {
    let content = resolve_env_vars(content, context)?;
    let config: DriverConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &DriverConfig) -> Result<()> {
    if config.machine_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "machine_name must not be empty".to_string(),
        ));
    }

    if config.config_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "config_dir must not be empty".to_string(),
        ));
    }

    for item in &config.variables {
        if !item.contains('=') {
            return Err(ConfigError::ValidationError(format!(
                "Invalid format for additional variable '{}' (expected name=value)",
                item
            )));
        }
    }

    Ok(())
}
