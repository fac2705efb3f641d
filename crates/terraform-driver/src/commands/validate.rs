use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let mut driver = super::load_driver(config_path)?;
    println!("Validating {}...", driver.config().config_dir.display());

    driver
        .validate()
        .await
        .context("Terraform configuration is not valid")?;

    println!("✓ Configuration valid");
    Ok(())
}
