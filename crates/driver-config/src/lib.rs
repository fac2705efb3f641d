//! # Driver Configuration
//!
//! YAML configuration for the Terraform machine driver.
//!
//! String values may reference environment variables as `${VAR}` or
//! `${VAR:-default}`; references are substituted before the YAML is parsed.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod parser;
pub mod resolver;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverConfig {
    /// Name of the machine being created
    pub machine_name: String,

    /// Directory holding the Terraform configuration (already fetched)
    pub config_dir: PathBuf,

    /// Explicit path to the Terraform executable; PATH is searched when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,

    /// Supplementary JSON variables file, lower priority than the configuration's own `tfvars.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_file: Option<PathBuf>,

    /// Additional `name=value` variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,

    /// Run `terraform refresh` after `apply`
    #[serde(default)]
    pub refresh_after_apply: bool,

    /// Run `terraform validate` before creating anything
    #[serde(default = "default_true")]
    pub validate: bool,

    /// SSH connection settings passed to the configuration
    #[serde(default)]
    pub ssh: SshSettings,

    /// The client's public IP address, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

/// SSH settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SshSettings {
    /// SSH user name
    #[serde(default = "default_ssh_user")]
    pub user: String,

    /// SSH port
    #[serde(default = "default_ssh_port")]
    pub port: u16,
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            port: default_ssh_port(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

impl DriverConfig {
    /// Create a configuration with defaults for everything but the required fields
    pub fn new(machine_name: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            machine_name: machine_name.into(),
            config_dir: config_dir.into(),
            executable: None,
            variables_file: None,
            variables: Vec::new(),
            refresh_after_apply: false,
            validate: true,
            ssh: SshSettings::default(),
            client_ip: None,
        }
    }

    /// The supplementary variables file, resolved against `cwd` when relative
    pub fn variables_file_in(&self, cwd: &Path) -> Option<PathBuf> {
        self.variables_file.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            }
        })
    }
}
