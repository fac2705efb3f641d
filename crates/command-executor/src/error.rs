//! Error types for command execution

use crate::process::FailureReason;
use thiserror::Error;

/// Unified error type for command execution
#[derive(Error, Debug)]
pub enum Error {
    /// The process could not be started; no output exists
    #[error("failed to start '{program}': {source}")]
    StartFailed {
        /// The program that failed to start
        program: String,
        /// The underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process started but did not finish successfully
    #[error("'{program}' {reason}")]
    AbnormalExit {
        /// The program that failed
        program: String,
        /// How the process ended
        reason: FailureReason,
        /// Everything the process printed before it ended
        output: String,
    },
}

impl Error {
    /// Create a start failed error
    pub fn start_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::StartFailed {
            program: program.into(),
            source,
        }
    }

    /// Output captured from the process, if it got far enough to produce any
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Error::StartFailed { .. } => None,
            Error::AbnormalExit { output, .. } => Some(output),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
