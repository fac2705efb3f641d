//! Locating the Terraform executable

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name searched for on PATH when no explicit executable is configured
pub const EXECUTABLE_NAME: &str = "terraform";

/// Identifies how to invoke Terraform: which executable, and in which directory
///
/// A handle starts out unresolved. [`ToolHandle::resolve`] fixes the
/// executable path exactly once; after that the handle is read-only.
#[derive(Debug, Clone)]
pub struct ToolHandle {
    executable_path: Option<PathBuf>,
    working_dir: PathBuf,
}

impl ToolHandle {
    /// Create an unresolved handle for the configuration in `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable_path: None,
            working_dir: working_dir.into(),
        }
    }

    /// Resolve the executable path.
    ///
    /// An explicit path only has to exist, and is made absolute against the
    /// current directory. Whether it can actually be run shows up as a start
    /// failure on first use. Without one, PATH is searched for `terraform`.
    /// On failure the handle stays unresolved.
    pub fn resolve(&mut self, explicit: Option<&Path>) -> Result<&Path> {
        if let Some(path) = &self.executable_path {
            return Err(Error::AlreadyResolved { path: path.clone() });
        }

        let resolved = match explicit {
            Some(path) => {
                debug!("Terraform executable location has been explicitly configured.");
                let not_found = |e: std::io::Error| Error::ExecutableNotFound {
                    executable: path.display().to_string(),
                    reason: e.to_string(),
                };
                std::fs::metadata(path).map_err(not_found)?;
                // Terraform runs in the configuration directory, so a relative
                // path must be anchored to ours before it is stored.
                std::path::absolute(path).map_err(not_found)?
            }
            None => {
                debug!(
                    "Terraform executable location has not been explicitly configured. Searching PATH."
                );
                which::which(EXECUTABLE_NAME).map_err(|e| Error::ExecutableNotFound {
                    executable: EXECUTABLE_NAME.to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        debug!("Using Terraform executable '{}'.", resolved.display());
        Ok(self.executable_path.insert(resolved).as_path())
    }

    /// The resolved executable path
    pub fn executable_path(&self) -> Result<&Path> {
        self.executable_path.as_deref().ok_or(Error::NotResolved)
    }

    /// Whether [`ToolHandle::resolve`] has succeeded
    pub fn is_resolved(&self) -> bool {
        self.executable_path.is_some()
    }

    /// The directory Terraform runs in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
