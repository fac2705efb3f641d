//! Runtime-agnostic command execution library
//!
//! This crate runs a command as a subprocess, drains its standard output and
//! standard error concurrently without blocking it, and classifies how it
//! ended. Output can be streamed to a [`LineHandler`] while the process runs
//! or collected and returned once it exits.

#![warn(missing_docs)]

pub mod backends;
pub mod command;
pub mod drain;
pub mod error;
pub mod event;
pub mod launcher;
pub mod process;

pub use backends::LocalLauncher;
pub use command::Command;
pub use error::{Error, Result};
pub use event::{LineEvent, LineHandler, LogSource};
pub use launcher::Launcher;
pub use process::{ExitStatus, FailureReason, InvocationResult};
