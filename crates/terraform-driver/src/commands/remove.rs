use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let mut driver = super::load_driver(config_path)?;

    driver
        .remove()
        .await
        .context("Failed to destroy Terraform configuration")?;

    println!("Machine '{}' removed", driver.config().machine_name);
    Ok(())
}
