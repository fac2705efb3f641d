//! Environment variable resolver
//!
//! Handles `${VAR}` and `${VAR:-default}` references.

use crate::{ConfigError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static VAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("variable reference pattern is valid"));

/// Context for resolving variables
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Environment variables (can be overridden)
    pub env_vars: HashMap<String, String>,
}

impl ResolutionContext {
    /// Create a context from the process environment
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a context with no variables at all
    pub fn empty() -> Self {
        Self {
            env_vars: HashMap::new(),
        }
    }

    /// Add or update an environment variable
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env_vars.insert(key.into(), value.into());
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve all environment variable references in a string
///
/// Every missing variable without a default is reported in one error.
pub fn resolve_env_vars(input: &str, context: &ResolutionContext) -> Result<String> {
    let mut missing = Vec::new();

    let resolved = VAR_REF.replace_all(input, |cap: &regex::Captures<'_>| {
        let var_expr = &cap[1];

        // Handle default values: ${VAR:-default}
        let (var_name, default_value) = match var_expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (var_expr, None),
        };

        match (context.env_vars.get(var_name), default_value) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => default.to_string(),
            (None, None) => {
                missing.push(var_name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(ConfigError::EnvVarNotFound(missing.join(", ")));
    }

    Ok(resolved.into_owned())
}
