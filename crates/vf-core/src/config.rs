//! Library configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! tool, workspace, and encode sections. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub workspace: WorkspaceConfig,
    pub encode: EncodeConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// [`from_file`](Self::from_file), degrading to defaults with a log line
    /// when there is no path, no file, or an unusable one.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(config) => config,
            Err(Error::Io { ref source }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist; using default config", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Problems worth logging that do not stop the editor from working.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every command will time out immediately".into());
        }

        if let Some(ref p) = self.tools.ffmpeg_path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.ffmpeg_path {} does not exist; falling back to PATH",
                    p.display()
                ));
            }
        }

        if let Some(ref root) = self.workspace.temp_root {
            if !root.is_dir() {
                warnings.push(format!(
                    "workspace.temp_root {} is not a directory",
                    root.display()
                ));
            }
        }

        for (name, value) in [
            ("encode.video_bitrate", &self.encode.video_bitrate),
            ("encode.audio_bitrate", &self.encode.audio_bitrate),
        ] {
            if !is_bitrate(value) {
                warnings.push(format!("{name} '{value}' is not a bitrate like 1500k or 2M"));
            }
        }

        warnings
    }
}

/// Accepts `<digits>[k|K|m|M]`, the shapes ffmpeg's `-b:v`/`-b:a` take.
fn is_bitrate(s: &str) -> bool {
    let digits = s.trim_end_matches(['k', 'K', 'm', 'M']);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// External tool paths and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ToolsConfig {
    /// The per-command timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    300
}

/// Where per-call temp directories are created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Parent directory for temp workspaces; the system temp dir when unset.
    pub temp_root: Option<PathBuf>,
}

/// Encoder settings applied by the composition operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    #[serde(default = "default_video_bitrate")]
    pub video_bitrate: String,
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
    /// Pass `-y` (overwrite outputs) instead of `-n`.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            video_bitrate: default_video_bitrate(),
            audio_bitrate: default_audio_bitrate(),
            overwrite: default_overwrite(),
        }
    }
}

fn default_video_bitrate() -> String {
    "1500k".into()
}

fn default_audio_bitrate() -> String {
    "64k".into()
}

fn default_overwrite() -> bool {
    true
}
