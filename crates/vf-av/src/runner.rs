//! The seam between building an invocation and running it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::command::{ToolCommand, ToolOutput};

/// Runs a fully built [`ToolCommand`].
///
/// Actions only ever talk to a `CommandRunner`, so tests can swap in a
/// recorder that never spawns a real process.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion, honouring `cancel`.
    async fn run(
        &self,
        command: &ToolCommand,
        cancel: &CancellationToken,
    ) -> vf_core::Result<ToolOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &ToolCommand,
        cancel: &CancellationToken,
    ) -> vf_core::Result<ToolOutput> {
        tracing::debug!("spawn: {command}");
        command.execute_with_cancel(cancel).await
    }
}
