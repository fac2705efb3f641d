//! Local process execution backend

use async_trait::async_trait;
use tracing::debug;

use crate::command::Command;
use crate::drain::drain_pipes;
use crate::error::{Error, Result};
use crate::event::LineHandler;
use crate::launcher::Launcher;
use crate::process::InvocationResult;

/// Launcher for executing processes locally
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLauncher;

#[async_trait]
impl Launcher for LocalLauncher {
    async fn run_streamed(
        &self,
        command: &Command,
        handler: &mut dyn LineHandler,
    ) -> Result<InvocationResult> {
        let program = command.get_program().to_string_lossy().into_owned();
        let command_line = command.display();

        debug!("Executing \"{}\" ...", command_line);
        let mut child = command
            .prepare()
            .spawn()
            .map_err(|e| Error::start_failed(program.clone(), e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Waiting must not start only after the pipes are drained, nor the other way round.
        let (output, wait) = futures::join!(drain_pipes(stdout, stderr, handler), child.status());

        let result = InvocationResult::classify(program, wait, output);
        match &result.failure {
            None => debug!("Successfully executed \"{}\"", command_line),
            Some(reason) => debug!("\"{}\" {}", command_line, reason),
        }

        Ok(result)
    }
}
