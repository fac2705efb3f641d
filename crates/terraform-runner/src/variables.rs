//! Terraform input variables and the `tfvars.json` file
//!
//! Loading is additive and never overwrites: the first source to supply a
//! variable wins. Load the primary file first and lower-priority sources
//! after it. Direct assignment through [`VariableMap::set`] always overwrites.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;
use tracing::debug;

/// File name of the variables file inside the configuration directory
pub const VARIABLES_FILE_NAME: &str = "tfvars.json";

/// A variable value, as it appears in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// JSON `null`
    Null,
    /// A boolean
    Bool(bool),
    /// A whole number
    Integer(i64),
    /// Any other number
    Float(f64),
    /// A string
    String(String),
    /// A list of values
    List(Vec<VariableValue>),
    /// A nested map of values
    Map(BTreeMap<String, VariableValue>),
}

impl VariableValue {
    /// The form written to the variables file: integers become decimal strings.
    ///
    /// Only the top-level value is converted.
    pub fn normalized(&self) -> VariableValue {
        match self {
            VariableValue::Integer(value) => VariableValue::String(value.to_string()),
            other => other.clone(),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::String(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::String(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        VariableValue::Integer(value)
    }
}

impl From<u16> for VariableValue {
    fn from(value: u16) -> Self {
        VariableValue::Integer(i64::from(value))
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

/// Values for Terraform configuration variables, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMap {
    variables: BTreeMap<String, VariableValue>,
}

impl VariableMap {
    /// Create an empty variable map
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every variable
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Set a variable, replacing any existing value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Set a variable only if it is not already present. Returns whether it was added.
    pub fn set_if_absent(
        &mut self,
        name: impl Into<String>,
        value: impl Into<VariableValue>,
    ) -> bool {
        match self.variables.entry(name.into()) {
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Get a variable by name
    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.variables.get(name)
    }

    /// Whether a variable is present
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether there are no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over variables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariableValue)> {
        self.variables.iter()
    }

    /// Read variables from a JSON object file (normally `tfvars.json`).
    ///
    /// Additive: names already present are left untouched. Call
    /// [`VariableMap::clear`] first for a fresh load. Returns how many
    /// variables were added.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let invalid = |reason: String| Error::InvalidVariablesFile {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let loaded: BTreeMap<String, VariableValue> =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        let total = loaded.len();
        let mut added = 0;
        for (name, value) in loaded {
            if self.set_if_absent(name, value) {
                added += 1;
            }
        }

        debug!(
            "Read {} variables from '{}' ({} new)",
            total,
            path.display(),
            added
        );
        Ok(added)
    }

    /// Merge `name=value` items. Additive, like [`VariableMap::load_from`].
    ///
    /// Values are always strings; only the first `=` separates name from value.
    pub fn merge_inline<I, S>(&mut self, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for item in items {
            let item = item.as_ref();
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| Error::InvalidInlineVariable {
                    item: item.to_string(),
                })?;
            if self.set_if_absent(name, value) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// A copy of the map with every value normalized for writing
    pub fn normalized(&self) -> VariableMap {
        VariableMap {
            variables: self
                .variables
                .iter()
                .map(|(name, value)| (name.clone(), value.normalized()))
                .collect(),
        }
    }

    /// Write the normalized variables as a pretty-printed JSON object.
    ///
    /// The in-memory map is not changed.
    pub fn persist_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(&self.normalized())
            .map_err(|e| io_error(e.into()))?;
        std::fs::write(path, json).map_err(io_error)?;

        debug!("Wrote {} variables to '{}'", self.len(), path.display());
        Ok(())
    }
}
