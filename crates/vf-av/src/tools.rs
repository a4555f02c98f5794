//! Locating ffmpeg.
//!
//! A [`ToolRegistry`] maps tool names to resolved [`ToolConfig`]s: an
//! executable path plus the timeout applied to every run of it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{ToolCommand, DEFAULT_TIMEOUT};

/// Tools the registry resolves and reports on.
const KNOWN_TOOLS: &[&str] = &["ffmpeg"];

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// One resolved executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    pub path: PathBuf,
    /// Runs longer than this are killed.
    #[serde(
        default = "default_timeout",
        with = "duration_secs",
        skip_serializing_if = "is_default_timeout"
    )]
    pub timeout: Duration,
}

impl ToolConfig {
    /// A tool at an explicit path with the default timeout.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder: override the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn is_default_timeout(d: &Duration) -> bool {
    *d == DEFAULT_TIMEOUT
}

/// Timeouts travel as whole seconds, matching `tools.timeout_secs`.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timeout: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(timeout.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// What [`ToolRegistry::check_all`] reports for one tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of `-version` output.
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Resolved external tools, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Resolve ffmpeg from `tools_config.ffmpeg_path` when that file exists,
    /// otherwise from `PATH`. A tool found nowhere is left out; asking for it
    /// later with [`require`](Self::require) fails.
    pub fn discover(tools_config: &vf_core::config::ToolsConfig) -> Self {
        let registry = Self::default();
        match resolve("ffmpeg", tools_config.ffmpeg_path.as_deref()) {
            Some(path) => registry
                .with_tool(ToolConfig::new("ffmpeg", path).with_timeout(tools_config.timeout())),
            None => {
                tracing::warn!("ffmpeg not found; editing operations will fail");
                registry
            }
        }
    }

    /// Builder: register (or replace) a tool explicitly.
    pub fn with_tool(mut self, tool: ToolConfig) -> Self {
        tracing::debug!("{} at {}", tool.name, tool.path.display());
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    /// The tool called `name`, or [`vf_core::Error::ToolNotFound`].
    pub fn require(&self, name: &str) -> vf_core::Result<&ToolConfig> {
        self.tools
            .get(name)
            .ok_or_else(|| vf_core::Error::tool_not_found(name))
    }

    /// Availability and version of every tool vidfx needs.
    pub async fn check_all(&self) -> Vec<ToolInfo> {
        let mut infos = Vec::with_capacity(KNOWN_TOOLS.len());
        for &name in KNOWN_TOOLS {
            let info = match self.tools.get(name) {
                Some(tool) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(tool).await,
                    path: Some(tool.path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            };
            infos.push(info);
        }
        infos
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ToolConfig)> {
        self.tools.iter()
    }
}

fn resolve(name: &str, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("{name} not found at {}; searching PATH", path.display());
    }
    which::which(name).ok()
}

/// First line of `<tool> -version`, if the tool runs at all.
async fn detect_version(tool: &ToolConfig) -> Option<String> {
    let mut cmd = ToolCommand::new(tool.path.clone());
    cmd.arg("-version").timeout(VERSION_TIMEOUT);
    match cmd.execute().await {
        Ok(out) => out.stdout.lines().next().map(str::to_string),
        Err(e) => {
            tracing::debug!("{} -version failed: {e}", tool.name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_core::config::ToolsConfig;

    #[tokio::test]
    async fn discovery_without_ffmpeg_does_not_panic() {
        // ffmpeg may or may not be installed where this runs.
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        assert_eq!(registry.check_all().await.len(), 1);
    }

    #[test]
    fn missing_configured_path_falls_back_to_path_search() {
        let cfg = ToolsConfig {
            ffmpeg_path: Some(PathBuf::from("/nonexistent/vidfx/ffmpeg")),
            timeout_secs: 5,
        };
        let registry = ToolRegistry::discover(&cfg);
        if let Ok(tool) = registry.require("ffmpeg") {
            assert_ne!(tool.path, PathBuf::from("/nonexistent/vidfx/ffmpeg"));
        }
    }

    #[test]
    fn discover_applies_configured_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffmpeg");
        std::fs::write(&fake, b"").unwrap();

        let cfg = ToolsConfig {
            ffmpeg_path: Some(fake.clone()),
            timeout_secs: 42,
        };
        let registry = ToolRegistry::discover(&cfg);
        let ffmpeg = registry.require("ffmpeg").unwrap();
        assert_eq!(ffmpeg.path, fake);
        assert_eq!(ffmpeg.timeout, Duration::from_secs(42));
    }

    #[test]
    fn require_missing_tool_returns_error() {
        let registry = ToolRegistry::default();
        let result = registry.require("ffmpeg");
        assert!(matches!(result, Err(vf_core::Error::ToolNotFound { .. })));
    }

    #[test]
    fn with_tool_registers_explicit_path() {
        let registry =
            ToolRegistry::default().with_tool(ToolConfig::new("ffmpeg", "/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(
            registry.require("ffmpeg").unwrap().path,
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
        assert_eq!(registry.iter().count(), 1);
    }

    #[tokio::test]
    async fn check_all_reports_missing_tool() {
        let infos = ToolRegistry::default().check_all().await;
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "ffmpeg");
        assert!(!infos[0].available);
        assert!(infos[0].version.is_none());
    }

    #[test]
    fn tool_config_serialization() {
        let cfg = ToolConfig::new("ffmpeg", "/usr/bin/ffmpeg");
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("ffmpeg"));
        assert!(!json.contains("timeout"));
        let back: ToolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);

        let slow = cfg.with_timeout(Duration::from_secs(600));
        let json = serde_json::to_string(&slow).unwrap();
        assert!(json.contains("\"timeout\":600"));
    }
}
