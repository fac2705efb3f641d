//! Command type for building executable commands

use async_process::{Command as AsyncCommand, Stdio};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A command to be executed
///
/// This is a builder for creating commands that can be converted to `async_process::Command`
/// when needed. Arguments are kept as a flat vector and handed to the OS as-is; no shell
/// is involved, so spaces and metacharacters in arguments are passed literally. The
/// environment is inherited from the parent process unchanged.
#[derive(Debug, Clone)]
pub struct Command {
    /// The program to execute
    program: OsString,
    /// The arguments to pass to the program
    args: Vec<OsString>,
    /// Working directory for the command
    current_dir: Option<PathBuf>,
}

impl Command {
    /// Create a new command for the given program
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: AsRef<Path>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.as_ref().to_owned());
        self
    }

    /// Get the program name
    pub fn get_program(&self) -> &OsStr {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the current directory
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Render the command line for log messages.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Prepare this command for execution by converting to an `async_process::Command`
    ///
    /// Standard output and standard error are piped, standard input is closed.
    pub fn prepare(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.program);

        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        cmd
    }
}

/// Builder pattern helper
impl Command {
    /// Create a builder for this command (for chaining)
    pub fn builder<S: AsRef<OsStr>>(program: S) -> CommandBuilder {
        CommandBuilder(Command::new(program))
    }
}

/// Builder wrapper for more ergonomic command construction
pub struct CommandBuilder(Command);

impl CommandBuilder {
    /// Add an argument
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.0.arg(arg);
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.0.args(args);
        self
    }

    /// Set the working directory
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.0.current_dir(dir);
        self
    }

    /// Build the command
    pub fn build(self) -> Command {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_args() {
        let mut cmd = Command::new("terraform");
        cmd.arg("apply").arg("-input=false");

        assert_eq!(cmd.get_program(), "terraform");
        assert_eq!(cmd.get_args().len(), 2);
        assert_eq!(cmd.get_args()[0], "apply");
        assert_eq!(cmd.get_args()[1], "-input=false");
    }

    #[test]
    fn test_command_builder() {
        let cmd = Command::builder("terraform")
            .arg("output")
            .arg("-json")
            .current_dir("/tmp")
            .build();

        assert_eq!(cmd.get_args(), &[OsString::from("output"), OsString::from("-json")]);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_display_keeps_argument_order() {
        let cmd = Command::builder("terraform")
            .args(["destroy", "-force", "-var-file=my vars.json"])
            .build();

        assert_eq!(cmd.display(), "terraform destroy -force -var-file=my vars.json");
    }
}
