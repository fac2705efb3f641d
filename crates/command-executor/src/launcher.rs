//! Launcher trait for running commands to completion

use crate::command::Command;
use crate::error::Result;
use crate::event::{LineEvent, LineHandler};
use crate::process::InvocationResult;
use async_trait::async_trait;

/// A launcher that can run commands and report how they ended
///
/// Both methods return only after the process has exited and both of its
/// output streams have been read to the end. `Err` means the process never
/// started; every other outcome, including a non-zero exit, is an `Ok`
/// [`InvocationResult`].
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Run a command, handing each output line to `handler` as soon as it is read
    async fn run_streamed(
        &self,
        command: &Command,
        handler: &mut dyn LineHandler,
    ) -> Result<InvocationResult>;

    /// Run a command and return its combined output once it has exited
    async fn run_buffered(&self, command: &Command) -> Result<InvocationResult> {
        let mut discard = |_: LineEvent| {};
        self.run_streamed(command, &mut discard).await
    }
}
