use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let mut driver = super::load_driver(config_path)?;

    driver
        .pre_create_check()
        .await
        .context("Pre-create check failed")?;
    driver.create().await.context("Failed to create machine")?;

    println!("Machine '{}' created", driver.config().machine_name);
    if let Some(ip) = driver.ip_address() {
        println!("  IP address: {}", ip);
    }
    println!("  SSH user:   {}", driver.ssh_user());
    if let Some(url) = driver.url() {
        println!("  Docker URL: {}", url);
    }

    Ok(())
}
