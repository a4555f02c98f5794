//! Execution context shared by every action.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vf_core::config::Config;

use crate::command::{ToolCommand, ToolOutput};
use crate::filters::validate;
use crate::runner::CommandRunner;
use crate::tools::ToolConfig;
use crate::workspace::Workspace;

/// Context passed to every action.
#[derive(Clone)]
pub struct ActionContext {
    /// Runs the commands actions build.
    pub runner: Arc<dyn CommandRunner>,
    /// The resolved ffmpeg executable.
    pub ffmpeg: ToolConfig,
    pub config: Arc<Config>,
    /// Checked before every stage and passed to every process.
    pub cancellation: CancellationToken,
}

impl ActionContext {
    /// Create a new context with a fresh cancellation token.
    pub fn new(runner: Arc<dyn CommandRunner>, ffmpeg: ToolConfig, config: Arc<Config>) -> Self {
        Self {
            runner,
            ffmpeg,
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Builder: attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// An ffmpeg command with the flags every invocation shares.
    pub fn ffmpeg_command(&self) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.ffmpeg.path.clone());
        cmd.timeout(self.ffmpeg.timeout);
        cmd.args(["-hide_banner", "-nostdin"]);
        cmd.arg(if self.config.encode.overwrite { "-y" } else { "-n" });
        cmd
    }

    /// A fresh workspace under the configured temp root.
    pub fn workspace(&self) -> vf_core::Result<Workspace> {
        let workspace = Workspace::new(self.config.workspace.temp_root.as_deref())?;
        validate::path("workspace", "temp_root", workspace.path())?;
        Ok(workspace)
    }

    /// Run one stage of an operation.
    pub async fn run(&self, step: &str, cmd: &ToolCommand) -> vf_core::Result<ToolOutput> {
        if self.cancellation.is_cancelled() {
            tracing::info!("{step}: cancelled before start");
            return Err(vf_core::Error::cancelled(step));
        }

        tracing::info!("{step}: {cmd}");
        let output = self.runner.run(cmd, &self.cancellation).await;
        if let Err(ref e) = output {
            tracing::error!("{step} failed: {e}");
        }
        output
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("ffmpeg", &self.ffmpeg)
            .field("config", &self.config)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}
