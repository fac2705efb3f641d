pub mod create;
pub mod outputs;
pub mod remove;
pub mod validate;

use anyhow::{Context, Result};
use driver_config::parser;
use std::path::Path;
use terraform_driver::Driver;

/// Load the configuration and build a driver for it
pub fn load_driver(config_path: &Path) -> Result<Driver> {
    let config = parser::parse_file(config_path)
        .with_context(|| format!("Failed to parse configuration '{}'", config_path.display()))?;
    Ok(Driver::new(config))
}
