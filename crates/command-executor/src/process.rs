//! Process exit status and invocation outcomes

use crate::error::{Error, Result};
use std::fmt;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Signal that terminated the process (Unix only)
    pub signal: Option<i32>,
}

impl ExitStatus {
    /// Returns true if the process exited successfully (code 0)
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns true if the process was terminated by a signal
    pub fn terminated_by_signal(&self) -> bool {
        self.signal.is_some()
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            #[cfg(unix)]
            signal: {
                use std::os::unix::process::ExitStatusExt;
                status.signal()
            },
            #[cfg(not(unix))]
            signal: None,
        }
    }
}

/// Why a started process is considered to have failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The process exited on its own with a non-zero code
    NonZeroExit {
        /// The exit code
        code: i32,
    },
    /// The process was killed by a signal
    Signalled {
        /// The signal number
        signal: i32,
    },
    /// Waiting for the process failed, or it ended without a code or signal
    WaitFailed {
        /// Description of the wait failure
        reason: String,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonZeroExit { code } => write!(f, "exited with status {}", code),
            FailureReason::Signalled { signal } => {
                write!(f, "did not exit cleanly (terminated by signal {})", signal)
            }
            FailureReason::WaitFailed { reason } => write!(f, "did not exit cleanly: {}", reason),
        }
    }
}

/// The outcome of running one process to completion
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// The program that was run
    pub program: String,
    /// Exit status, when the wait itself succeeded
    pub status: Option<ExitStatus>,
    /// Every line written to stdout and stderr, newline-terminated, in the order read
    pub output: String,
    /// Present iff the invocation did not succeed
    pub failure: Option<FailureReason>,
}

impl InvocationResult {
    /// Classify the result of waiting for a process that was started successfully.
    pub fn classify(
        program: impl Into<String>,
        wait: std::io::Result<std::process::ExitStatus>,
        output: String,
    ) -> Self {
        let (status, failure) = match wait {
            Ok(status) => {
                let status = ExitStatus::from(status);
                (Some(status), failure_of(&status))
            }
            Err(e) => (
                None,
                Some(FailureReason::WaitFailed {
                    reason: e.to_string(),
                }),
            ),
        };

        Self {
            program: program.into(),
            status,
            output,
            failure,
        }
    }

    /// True iff the process ran to completion and exited with status zero
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Consume the result, returning the captured output on success or an
    /// [`Error::AbnormalExit`] carrying it on failure.
    pub fn into_output(self) -> Result<String> {
        match self.failure {
            None => Ok(self.output),
            Some(reason) => Err(Error::AbnormalExit {
                program: self.program,
                reason,
                output: self.output,
            }),
        }
    }
}

fn failure_of(status: &ExitStatus) -> Option<FailureReason> {
    match (status.code, status.signal) {
        (Some(0), _) => None,
        (Some(code), _) => Some(FailureReason::NonZeroExit { code }),
        (None, Some(signal)) => Some(FailureReason::Signalled { signal }),
        (None, None) => Some(FailureReason::WaitFailed {
            reason: "process ended without an exit code".to_string(),
        }),
    }
}
