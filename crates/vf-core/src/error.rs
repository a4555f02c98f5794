//! Unified error type for vidfx.
//!
//! All crates funnel their failures into [`Error`]. A failed external process
//! is always an [`Error::Process`]; everything that is rejected before a
//! process is spawned is an [`Error::InvalidParameter`].

use std::time::Duration;

/// Unified error type covering all failure modes in vidfx.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external tool failed to spawn or exited with a non-zero status.
    #[error("Process error [{tool}]: {message}")]
    Process {
        /// Name of the tool that failed.
        tool: String,
        /// Exit code, if the process ran and exited normally.
        code: Option<i32>,
        /// Human-readable error description (includes trimmed stderr).
        message: String,
    },

    /// An external tool ran past its timeout and was killed.
    #[error("Process error [{tool}]: timed out after {after:?}")]
    Timeout {
        /// Name of the tool that was killed.
        tool: String,
        /// The timeout that expired.
        after: Duration,
    },

    /// The operation was cancelled by its caller.
    #[error("Cancelled: {tool}")]
    Cancelled {
        /// Name of the tool (or stage) that was cancelled.
        tool: String,
    },

    /// A required external tool is not installed or not on `PATH`.
    #[error("{tool} not found; is it installed and in PATH?")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: String,
    },

    /// A parameter was rejected before any process was started.
    #[error("Invalid parameter [{operation}.{parameter}]: {message}")]
    InvalidParameter {
        /// The operation being configured (e.g. "unsharp").
        operation: String,
        /// The offending parameter.
        parameter: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Process`].
    pub fn process(tool: impl Into<String>, code: Option<i32>, message: impl Into<String>) -> Self {
        Error::Process {
            tool: tool.into(),
            code,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidParameter`].
    pub fn invalid(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            operation: operation.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Cancelled`].
    pub fn cancelled(tool: impl Into<String>) -> Self {
        Error::Cancelled { tool: tool.into() }
    }

    /// Convenience constructor for [`Error::ToolNotFound`].
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Error::ToolNotFound { tool: tool.into() }
    }

    /// Whether this error came from running (or trying to run) an external
    /// process, as opposed to rejecting the request up front.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            Error::Process { .. } | Error::Timeout { .. } | Error::Cancelled { .. }
        )
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_display() {
        let err = Error::process("ffmpeg", Some(1), "exited with status 1: bad filter");
        assert_eq!(
            err.to_string(),
            "Process error [ffmpeg]: exited with status 1: bad filter"
        );
        assert!(err.is_process_failure());
    }

    #[test]
    fn timeout_display() {
        let err = Error::Timeout {
            tool: "ffmpeg".into(),
            after: Duration::from_millis(100),
        };
        assert!(err.to_string().contains("timed out"));
        assert!(err.is_process_failure());
    }

    #[test]
    fn cancelled_display() {
        let err = Error::cancelled("ffmpeg");
        assert_eq!(err.to_string(), "Cancelled: ffmpeg");
    }

    #[test]
    fn tool_not_found_display() {
        let err = Error::tool_not_found("ffmpeg");
        assert_eq!(err.to_string(), "ffmpeg not found; is it installed and in PATH?");
        assert!(!err.is_process_failure());
    }

    #[test]
    fn invalid_parameter_display() {
        let err = Error::invalid("unsharp", "luma_msize_x", "must be odd");
        assert_eq!(
            err.to_string(),
            "Invalid parameter [unsharp.luma_msize_x]: must be odd"
        );
        assert!(!err.is_process_failure());
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
    }
}
