//! Error types for driving Terraform

use command_executor::FailureReason;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the executable resolver, the command facade and the variable store
#[derive(Debug, Error)]
pub enum Error {
    /// The executable could not be found
    #[error("Terraform executable '{executable}' not found: {reason}")]
    ExecutableNotFound {
        /// The explicit path, or the name searched for on PATH
        executable: String,
        /// Why the lookup failed
        reason: String,
    },

    /// The executable path was already resolved for this handle
    #[error("Terraform executable has already been resolved to '{}'", .path.display())]
    AlreadyResolved {
        /// The path resolved earlier
        path: PathBuf,
    },

    /// An invocation was attempted before the executable was resolved
    #[error("Terraform executable path has not been resolved")]
    NotResolved,

    /// The process could not be started
    #[error("failed to start '{program}': {source}")]
    StartFailed {
        /// The program that failed to start
        program: String,
        /// The underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process started but exited non-zero or was killed
    #[error("'{program}' {reason}")]
    AbnormalExit {
        /// The program that failed
        program: String,
        /// How the process ended
        reason: FailureReason,
        /// Everything the process printed before it ended
        output: String,
    },

    /// A variables file could not be read or is not a JSON object
    #[error("invalid variables file '{}': {reason}", .path.display())]
    InvalidVariablesFile {
        /// The file that was being read
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// A `name=value` variable item has no `=`
    #[error("invalid format for additional variable '{item}' (expected name=value)")]
    InvalidInlineVariable {
        /// The offending item
        item: String,
    },

    /// The result of `terraform output -json` is not valid JSON
    #[error("failed to parse JSON from Terraform output: {source}")]
    OutputParseFailed {
        /// The JSON error
        #[source]
        source: serde_json::Error,
        /// The raw text that failed to parse
        output: String,
    },

    /// A named Terraform operation failed
    #[error("failed to execute 'terraform {verb}': {source}")]
    OperationFailed {
        /// The verb that was run
        verb: String,
        /// What went wrong
        #[source]
        source: Box<Error>,
    },

    /// Writing a file failed
    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        /// The file being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an error with the name of the Terraform verb that produced it
    pub fn operation_failed(verb: impl Into<String>, source: Error) -> Self {
        Self::OperationFailed {
            verb: verb.into(),
            source: Box::new(source),
        }
    }

    /// Output captured from Terraform, when the failing process got far enough to produce any
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Error::AbnormalExit { output, .. } | Error::OutputParseFailed { output, .. } => {
                Some(output)
            }
            Error::OperationFailed { source, .. } => source.captured_output(),
            _ => None,
        }
    }

    /// True if the underlying failure is that the process never started
    pub fn is_start_failure(&self) -> bool {
        match self {
            Error::StartFailed { .. } => true,
            Error::OperationFailed { source, .. } => source.is_start_failure(),
            _ => false,
        }
    }
}

impl From<command_executor::Error> for Error {
    fn from(err: command_executor::Error) -> Self {
        match err {
            command_executor::Error::StartFailed { program, source } => {
                Error::StartFailed { program, source }
            }
            command_executor::Error::AbnormalExit {
                program,
                reason,
                output,
            } => Error::AbnormalExit {
                program,
                reason,
                output,
            },
        }
    }
}

/// Result type for Terraform operations
pub type Result<T> = std::result::Result<T, Error>;
