//! Shared test harness for integration tests.
//!
//! Provides [`MockRunner`], which records every ffmpeg invocation instead of
//! spawning it, and [`TestHarness`], which wires it into an [`Editor`] whose
//! workspaces live under a scratch directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use vidfx::{CommandRunner, Config, Editor, Error, ToolCommand, ToolConfig, ToolOutput};

/// Records commands and pretends to be ffmpeg.
#[derive(Default)]
pub struct MockRunner {
    calls: Mutex<Vec<ToolCommand>>,
    fail_at: Option<usize>,
}

impl MockRunner {
    /// Fail the `n`th (0-based) call and every one after it.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &ToolCommand, _cancel: &CancellationToken) -> vidfx::Result<ToolOutput> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(command.clone());
            calls.len() - 1
        };

        if self.fail_at.is_some_and(|n| index >= n) {
            return Err(Error::process("ffmpeg", Some(1), "Invalid data found when processing input"));
        }

        if let Some(out) = command.arguments().last() {
            let out = Path::new(out);
            if out.is_absolute() && out.parent().is_some_and(Path::exists) {
                std::fs::write(out, b"media").unwrap();
            }
        }

        Ok(ToolOutput {
            code: Some(0),
            stdout: format!("run {index}"),
            stderr: String::new(),
        })
    }
}

/// An [`Editor`] backed by a [`MockRunner`], with scratch directories for
/// media and for workspaces.
pub struct TestHarness {
    pub editor: Editor,
    pub runner: Arc<MockRunner>,
    pub media: TempDir,
    pub temp_root: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_runner(MockRunner::default(), Config::default())
    }

    pub fn with_runner(runner: MockRunner, mut config: Config) -> Self {
        let media = tempfile::tempdir().expect("media dir");
        let temp_root = tempfile::tempdir().expect("temp root");
        config.workspace.temp_root = Some(temp_root.path().to_path_buf());

        let runner = Arc::new(runner);
        let editor = Editor::with_runner(
            runner.clone(),
            ToolConfig::new("ffmpeg", "/usr/bin/ffmpeg"),
            config,
        );

        Self {
            editor,
            runner,
            media,
            temp_root,
        }
    }

    /// Path of `name` inside the media dir, created with placeholder bytes.
    pub fn input(&self, name: &str) -> PathBuf {
        let path = self.media.path().join(name);
        std::fs::write(&path, b"source").expect("write input");
        path
    }

    /// Path of `name` inside the media dir, not created.
    pub fn output(&self, name: &str) -> PathBuf {
        self.media.path().join(name)
    }

    /// Number of entries left under the workspace root.
    pub fn leftover_temp_entries(&self) -> usize {
        std::fs::read_dir(self.temp_root.path()).unwrap().count()
    }
}
