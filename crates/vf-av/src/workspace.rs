//! Workspace management for multi-stage operations.
//!
//! A [`Workspace`] is a uniquely named temporary directory that holds the
//! intermediate files of a single call. It is removed, together with
//! everything inside it, when the workspace is closed or dropped, so an
//! intermediate never outlives the call that created it.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Prefix of every workspace directory name.
const WORKSPACE_PREFIX: &str = "vidfx-";

/// Scratch directory for the intermediates of one operation.
///
/// # Example
///
/// ```no_run
/// use vf_av::Workspace;
///
/// let workspace = Workspace::new(None).unwrap();
/// let intermediate = workspace.intermediate("ts");
/// // ... run a stage that writes `intermediate`, then one that reads it ...
/// workspace.close();
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a new workspace under `root`, or under the system temp dir
    /// when `root` is `None`.
    pub fn new(root: Option<&Path>) -> vf_core::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let temp_dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        tracing::debug!("workspace created at {}", temp_dir.path().display());
        Ok(Self { temp_dir })
    }

    /// Path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A fresh, globally unique file path inside the workspace with the
    /// given extension. Nothing is created on disk.
    pub fn intermediate(&self, extension: &str) -> PathBuf {
        let name = format!("{}.{extension}", uuid::Uuid::new_v4());
        self.temp_dir.path().join(name)
    }

    /// Remove the workspace now, logging (rather than returning) a failure.
    pub fn close(self) {
        let path = self.temp_dir.path().to_path_buf();
        match self.temp_dir.close() {
            Ok(()) => tracing::debug!("workspace removed: {}", path.display()),
            Err(e) => tracing::warn!("failed to remove workspace {}: {e}", path.display()),
        }
    }
}
