//! Builder for executing external tool commands with timeout and
//! cancellation support.
//!
//! Commands are always spawned directly from an argument vector; no shell
//! ever sees the arguments.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use vf_core::Error;

/// Default command timeout: 5 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Output captured from a tool execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code (`None` if the process was terminated by a signal).
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use vf_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> vf_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .args(["-hide_banner", "-nostdin", "-y"])
///     .arg("-i").arg("in.mp4")
///     .arg("-vf").arg("vflip")
///     .arg("out.mp4")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

/// How the wait for a child process ended.
enum Outcome {
    Exited(std::io::Result<ExitStatus>),
    TimedOut,
    Cancelled,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(&mut self, path: &Path) -> &mut Self {
        self.arg(path.to_string_lossy())
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The argument vector, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The configured timeout.
    pub fn time_limit(&self) -> Duration {
        self.timeout
    }

    /// Value following the first occurrence of `flag`, if any.
    ///
    /// `cmd.value_of("-vf")` returns the filter graph of an ffmpeg command.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every value following an occurrence of `flag`, in order.
    pub fn values_of<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.args
            .windows(2)
            .filter(move |w| w[0] == flag)
            .map(|w| w[1].as_str())
    }

    /// Short tool name used in logs and errors (the program's file name).
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// See [`execute_with_cancel`](Self::execute_with_cancel).
    pub async fn execute(&self) -> vf_core::Result<ToolOutput> {
        self.execute_with_cancel(&CancellationToken::new()).await
    }

    /// Execute the command, killing the child if `cancel` fires or the
    /// timeout expires.
    ///
    /// # Errors
    ///
    /// - [`Error::Process`] if spawning fails or the process exits with a
    ///   non-zero status (message includes stderr).
    /// - [`Error::Timeout`] if the process runs past the timeout.
    /// - [`Error::Cancelled`] if `cancel` fires first.
    pub async fn execute_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> vf_core::Result<ToolOutput> {
        let tool = self.tool_name();

        if cancel.is_cancelled() {
            return Err(Error::cancelled(tool));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::process(&tool, None, format!("failed to spawn: {e}")))?;

        // The deadline covers draining the pipes too: a descendant that
        // inherited them can keep them open after the child itself exits.
        let deadline = Instant::now() + self.timeout;
        let stdout_task = tokio::spawn(drain(child.stdout.take()));
        let stderr_task = tokio::spawn(drain(child.stderr.take()));
        let drains = [stdout_task.abort_handle(), stderr_task.abort_handle()];
        let abort_drains = || drains.iter().for_each(AbortHandle::abort);

        let outcome = tokio::select! {
            status = child.wait() => Outcome::Exited(status),
            _ = tokio::time::sleep_until(deadline) => Outcome::TimedOut,
            _ = cancel.cancelled() => Outcome::Cancelled,
        };

        let status = match outcome {
            Outcome::Exited(status) => status.map_err(|e| {
                Error::process(&tool, None, format!("I/O error waiting for process: {e}"))
            })?,
            Outcome::TimedOut => {
                kill(&mut child, &tool).await;
                abort_drains();
                return Err(Error::Timeout {
                    tool,
                    after: self.timeout,
                });
            }
            Outcome::Cancelled => {
                kill(&mut child, &tool).await;
                abort_drains();
                return Err(Error::cancelled(tool));
            }
        };

        let (stdout, stderr) = tokio::select! {
            (out, err) = async { tokio::join!(stdout_task, stderr_task) } => {
                (out.unwrap_or_default(), err.unwrap_or_default())
            }
            _ = tokio::time::sleep_until(deadline) => {
                tracing::warn!("{tool} exited but its output pipes stayed open");
                abort_drains();
                return Err(Error::Timeout {
                    tool,
                    after: self.timeout,
                });
            }
            _ = cancel.cancelled() => {
                abort_drains();
                return Err(Error::cancelled(tool));
            }
        };

        let output = ToolOutput {
            code: status.code(),
            stdout,
            stderr,
        };

        if !status.success() {
            return Err(Error::process(
                tool,
                output.code,
                format!("exited with status {}: {}", status, output.stderr.trim()),
            ));
        }

        Ok(output)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Read a child pipe to the end, lossily decoding it as UTF-8.
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        if let Err(e) = reader.read_to_end(&mut buf).await {
            tracing::debug!("failed to read child pipe: {e}");
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

async fn kill(child: &mut Child, tool: &str) {
    if let Err(e) = child.kill().await {
        tracing::warn!("failed to kill {tool}: {e}");
    }
}
