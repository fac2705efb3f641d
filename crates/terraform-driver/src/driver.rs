//! The machine driver workflow
//!
//! Creating a machine is two steps. [`Driver::pre_create_check`] resolves the
//! executable, fetches modules, validates the configuration and writes
//! `tfvars.json`; [`Driver::create`] applies it and reads back the machine's
//! address. [`Driver::remove`] destroys everything again.

use anyhow::{Context, Result, bail};
use command_executor::{Launcher, LocalLauncher};
use driver_config::DriverConfig;
use std::path::{Path, PathBuf};
use terraform_runner::{Outputs, Terraformer, VariableMap};
use tracing::{debug, info};

/// Output the configuration must declare with the machine's IP address
pub const MACHINE_IP_OUTPUT: &str = "dm_machine_ip";

/// Optional output overriding the SSH user
pub const SSH_USER_OUTPUT: &str = "dm_ssh_user";

/// Port the Docker daemon listens on
const DOCKER_PORT: u16 = 2376;

/// Drives Terraform to create and remove one machine
pub struct Driver<L: Launcher = LocalLauncher> {
    config: DriverConfig,
    terraformer: Terraformer<L>,
    variables: VariableMap,
    ip_address: Option<String>,
    ssh_user: String,
}

impl Driver<LocalLauncher> {
    /// Create a driver that runs Terraform locally
    pub fn new(config: DriverConfig) -> Self {
        Self::with_launcher(config, LocalLauncher)
    }
}

impl<L: Launcher> Driver<L> {
    /// Create a driver that runs Terraform through `launcher`
    pub fn with_launcher(config: DriverConfig, launcher: L) -> Self {
        let terraformer = Terraformer::with_launcher(config.config_dir.clone(), launcher);
        let ssh_user = config.ssh.user.clone();
        Self {
            config,
            terraformer,
            variables: VariableMap::new(),
            ip_address: None,
            ssh_user,
        }
    }

    /// The driver configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The variables written by the last [`Driver::write_variables`]
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// The machine's IP address, once created
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    /// The SSH user for the machine
    pub fn ssh_user(&self) -> &str {
        &self.ssh_user
    }

    /// Docker daemon URL on the machine, once created
    pub fn url(&self) -> Option<String> {
        self.ip_address
            .as_ref()
            .map(|ip| format!("tcp://{}:{}", ip, DOCKER_PORT))
    }

    /// Path of the variables file Terraform reads
    pub fn variables_file(&self) -> PathBuf {
        self.terraformer.variables_file()
    }

    /// Resolve the Terraform executable, once
    pub fn resolved_terraformer(&mut self) -> Result<&Terraformer<L>> {
        if !self.terraformer.handle().is_resolved() {
            let explicit = self.config.executable.clone();
            let path = self
                .terraformer
                .resolve(explicit.as_deref())
                .context("Unable to locate the Terraform executable")?;
            info!("Using Terraform executable '{}'", path.display());
        }
        Ok(&self.terraformer)
    }

    /// Check and prepare everything needed before creating the machine
    pub async fn pre_create_check(&mut self) -> Result<()> {
        if !self.config.config_dir.is_dir() {
            bail!(
                "Terraform configuration directory '{}' does not exist",
                self.config.config_dir.display()
            );
        }

        info!(
            "Will create machine '{}' using Terraform configuration from '{}'.",
            self.config.machine_name,
            self.config.config_dir.display()
        );

        let validate = self.config.validate;
        let terraformer = self.resolved_terraformer()?;

        debug!("Fetching Terraform modules (if any)...");
        terraformer.get_modules().await?;

        if validate {
            info!("Validating Terraform configuration...");
            terraformer.validate().await?;
        }

        info!("Customising Terraform configuration...");
        let cwd = std::env::current_dir().context("Unable to determine working directory")?;
        self.build_variables(&cwd)?;
        self.write_variables()
    }

    /// Assemble the variables for the configuration.
    ///
    /// The configuration's own `tfvars.json` has the highest priority. Driver
    /// context values replace anything it sets for them; inline variables and
    /// then the supplementary file only fill in names nobody set yet.
    pub fn build_variables(&mut self, cwd: &Path) -> Result<()> {
        let primary = self.variables_file();

        self.variables.clear();
        if primary.exists() {
            debug!("Reading Terraform variables from '{}'...", primary.display());
            self.variables.load_from(&primary)?;
        }

        self.variables
            .set("dm_machine_name", self.config.machine_name.as_str());
        self.variables.set("dm_ssh_user", self.config.ssh.user.as_str());
        self.variables.set("dm_ssh_port", self.config.ssh.port);
        if let Some(client_ip) = &self.config.client_ip {
            self.variables.set("dm_client_ip", client_ip.as_str());
        }

        self.variables.merge_inline(&self.config.variables)?;

        if let Some(path) = self.config.variables_file_in(cwd) {
            debug!(
                "Reading additional Terraform variables from '{}'...",
                path.display()
            );
            self.variables
                .load_from(&path)
                .with_context(|| format!("Unable to read additional variables from '{}'", path.display()))?;
        }

        Ok(())
    }

    /// Persist the variables to `tfvars.json` in the configuration directory
    pub fn write_variables(&self) -> Result<()> {
        let path = self.variables_file();
        debug!(
            "Writing {} Terraform variables to '{}'...",
            self.variables.len(),
            path.display()
        );
        self.variables.persist_to(&path)?;
        Ok(())
    }

    /// Apply the configuration and read back the machine's address
    pub async fn create(&mut self) -> Result<()> {
        let refresh = self.config.refresh_after_apply;
        let variables_file = self.existing_variables_file();
        let terraformer = self.resolved_terraformer()?;

        info!("Applying Terraform configuration...");
        terraformer.apply(variables_file.as_deref()).await?;

        if refresh {
            info!("Refreshing Terraform configuration state...");
            terraformer.refresh(variables_file.as_deref()).await?;
        }

        let outputs = terraformer.output().await?;
        self.record_outputs(&outputs)?;

        info!("Deployed host has IP '{}'.", self.ip_address.as_deref().unwrap_or_default());
        info!("Deployed host has SSH user '{}'.", self.ssh_user);
        Ok(())
    }

    fn record_outputs(&mut self, outputs: &Outputs) -> Result<()> {
        let Some(ip) = outputs.get(MACHINE_IP_OUTPUT) else {
            bail!("Configuration does not declare required output '{}'", MACHINE_IP_OUTPUT);
        };
        let Some(ip) = ip.as_str() else {
            bail!("Output '{}' is not a string", MACHINE_IP_OUTPUT);
        };
        self.ip_address = Some(ip.to_string());

        if let Some(user) = outputs.get(SSH_USER_OUTPUT).and_then(|o| o.as_str()) {
            self.ssh_user = user.to_string();
        }
        Ok(())
    }

    /// Query the current outputs
    pub async fn outputs(&mut self) -> Result<Outputs> {
        Ok(self.resolved_terraformer()?.output().await?)
    }

    /// Validate the configuration without changing anything
    pub async fn validate(&mut self) -> Result<()> {
        self.resolved_terraformer()?.validate().await?;
        Ok(())
    }

    /// Destroy everything the configuration created
    pub async fn remove(&mut self) -> Result<()> {
        let variables_file = self.existing_variables_file();

        info!("Destroying Terraform configuration...");
        self.resolved_terraformer()?.destroy(variables_file.as_deref()).await?;
        self.ip_address = None;
        Ok(())
    }

    fn existing_variables_file(&self) -> Option<PathBuf> {
        let path = self.variables_file();
        path.exists().then_some(path)
    }
}
