//! Named Terraform operations

use command_executor::{Command, InvocationResult, Launcher, LineEvent, LineHandler, LocalLauncher};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::handle::ToolHandle;
use crate::outputs::{Outputs, parse_outputs};
use crate::variables::VARIABLES_FILE_NAME;

/// Non-interactive flags shared by the state-changing verbs
const NON_INTERACTIVE: [&str; 2] = ["-input=false", "-no-color"];

/// How streamed output lines are logged
#[derive(Debug, Clone, Copy)]
enum Echo {
    Debug,
    Info,
}

/// Runs Terraform against one configuration directory
///
/// Every call blocks until its process has exited; none are retried.
pub struct Terraformer<L: Launcher = LocalLauncher> {
    handle: ToolHandle,
    launcher: L,
}

impl Terraformer<LocalLauncher> {
    /// Create a terraformer for the configuration in `config_dir`.
    ///
    /// The executable must be resolved with [`Terraformer::resolve`] before use.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self::with_launcher(config_dir, LocalLauncher)
    }
}

impl<L: Launcher> Terraformer<L> {
    /// Create a terraformer that runs processes through `launcher`
    pub fn with_launcher(config_dir: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            handle: ToolHandle::new(config_dir),
            launcher,
        }
    }

    /// Resolve the executable: `explicit` if given, otherwise search PATH
    pub fn resolve(&mut self, explicit: Option<&Path>) -> Result<&Path> {
        self.handle.resolve(explicit)
    }

    /// The tool handle
    pub fn handle(&self) -> &ToolHandle {
        &self.handle
    }

    /// The configuration directory Terraform runs in
    pub fn config_dir(&self) -> &Path {
        self.handle.working_dir()
    }

    /// Path of the variables file inside the configuration directory
    pub fn variables_file(&self) -> PathBuf {
        self.config_dir().join(VARIABLES_FILE_NAME)
    }

    fn command<S: AsRef<str>>(&self, verb: &str, args: &[S]) -> Result<Command> {
        let executable = self.handle.executable_path()?;

        let mut command = Command::new(executable);
        command.arg(verb);
        for arg in args {
            let arg: &str = arg.as_ref();
            command.arg(arg);
        }
        command.current_dir(self.handle.working_dir());
        Ok(command)
    }

    /// Run `terraform <verb> <args..>`, handing each output line to `handler` as it arrives
    pub async fn run_streamed<S: AsRef<str>>(
        &self,
        verb: &str,
        args: &[S],
        handler: &mut dyn LineHandler,
    ) -> Result<InvocationResult> {
        let command = self.command(verb, args)?;
        Ok(self.launcher.run_streamed(&command, handler).await?)
    }

    /// Run `terraform <verb> <args..>` and return its combined output after it exits
    pub async fn run_buffered<S: AsRef<str>>(
        &self,
        verb: &str,
        args: &[S],
    ) -> Result<InvocationResult> {
        let command = self.command(verb, args)?;
        Ok(self.launcher.run_buffered(&command).await?)
    }

    async fn run_operation(&self, verb: &'static str, args: Vec<String>, echo: Echo) -> Result<()> {
        let mut log_line = move |event: LineEvent| match echo {
            Echo::Debug => debug!(stream = %event.source, "{}", event.line),
            Echo::Info => info!(stream = %event.source, "{}", event.line),
        };

        self.run_streamed(verb, &args, &mut log_line)
            .await
            .and_then(|result| result.into_output().map_err(Error::from))
            .map(|_| ())
            .map_err(|e| Error::operation_failed(verb, e))
    }

    /// `terraform get`: fetch the modules the configuration uses
    pub async fn get_modules(&self) -> Result<()> {
        self.run_operation("get", vec!["-no-color".to_string()], Echo::Debug)
            .await
    }

    /// `terraform validate`
    pub async fn validate(&self) -> Result<()> {
        self.run_operation("validate", Vec::new(), Echo::Info).await
    }

    /// `terraform apply`, non-interactive
    pub async fn apply(&self, variables_file: Option<&Path>) -> Result<()> {
        self.run_operation("apply", state_args(&[], variables_file), Echo::Debug)
            .await
    }

    /// `terraform refresh`, non-interactive
    pub async fn refresh(&self, variables_file: Option<&Path>) -> Result<()> {
        self.run_operation("refresh", state_args(&[], variables_file), Echo::Debug)
            .await
    }

    /// `terraform destroy`, forced and non-interactive
    pub async fn destroy(&self, variables_file: Option<&Path>) -> Result<()> {
        self.run_operation("destroy", state_args(&["-force"], variables_file), Echo::Debug)
            .await
    }

    /// `terraform output -json`, parsed into outputs keyed by name.
    ///
    /// Always runs Terraform; results are never cached.
    pub async fn output(&self) -> Result<Outputs> {
        let output = self
            .run_buffered("output", &["-json"])
            .await
            .and_then(|result| result.into_output().map_err(Error::from))
            .map_err(|e| Error::operation_failed("output", e))?;

        let outputs = parse_outputs(&output)?;
        debug!("Terraform reported {} outputs", outputs.len());
        Ok(outputs)
    }
}

fn state_args(extra: &[&str], variables_file: Option<&Path>) -> Vec<String> {
    let mut args: Vec<String> = extra
        .iter()
        .chain(NON_INTERACTIVE.iter())
        .map(|arg| arg.to_string())
        .collect();
    if let Some(path) = variables_file {
        args.push(format!("-var-file={}", path.display()));
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroy_args_keep_order() {
        let args = state_args(&["-force"], Some(Path::new("/cfg/tfvars.json")));
        assert_eq!(
            args,
            ["-force", "-input=false", "-no-color", "-var-file=/cfg/tfvars.json"]
        );
    }

    #[test]
    fn var_file_flag_is_optional() {
        assert_eq!(state_args(&[], None), ["-input=false", "-no-color"]);
    }
}
