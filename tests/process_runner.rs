//! End-to-end runs against a fake `ffmpeg` shell script, so the real
//! `ProcessRunner` path (spawn, capture, exit status, timeout) is exercised.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tempfile::TempDir;
use vidfx::{Config, Editor, Error, ProcessRunner, ToolConfig, Unsharp};

/// Write an executable script named `ffmpeg` into `dir` with `body`.
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Logs its arguments one per line and writes its last argument like
/// ffmpeg writes its output.
fn recording_ffmpeg(dir: &Path) -> (PathBuf, PathBuf) {
    let log = dir.join("args.log");
    let body = format!(
        "printf '%s\\n' \"$@\" >> '{log}'\necho '--' >> '{log}'\nfor last; do :; done\necho media > \"$last\"\necho done",
        log = log.display()
    );
    (fake_ffmpeg(dir, &body), log)
}

fn editor(ffmpeg: PathBuf, temp_root: &Path) -> Editor {
    let mut config = Config::default();
    config.workspace.temp_root = Some(temp_root.to_path_buf());
    Editor::with_runner(Arc::new(ProcessRunner), ToolConfig::new("ffmpeg", ffmpeg), config)
}

#[tokio::test]
async fn single_stage_runs_real_process() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let (ffmpeg, log) = recording_ffmpeg(bin.path());
    let editor = editor(ffmpeg, media.path());

    let output = media.path().join("sharp.mp4");
    let result = editor
        .unsharp(media.path().join("in.mp4"), &output, Unsharp::default())
        .await
        .unwrap();

    assert_eq!(result.stdout().trim(), "done");
    assert!(output.exists());

    let args = std::fs::read_to_string(log).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(&args[..3], ["-hide_banner", "-nostdin", "-y"]);
    assert!(args.contains(&"-vf"));
    assert!(args.iter().any(|a| a.starts_with("unsharp=luma_msize_x=5")));
}

#[tokio::test]
async fn two_stage_runs_and_cleans_up() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let (ffmpeg, log) = recording_ffmpeg(bin.path());
    let editor = editor(ffmpeg, temp_root.path());

    let output = media.path().join("relief.mp4");
    let result = editor.relief(media.path().join("in.mp4"), &output).await.unwrap();

    assert_eq!(result.steps.len(), 2);
    assert!(output.exists());
    assert_eq!(std::fs::read_dir(temp_root.path()).unwrap().count(), 0);

    let log = std::fs::read_to_string(log).unwrap();
    assert_eq!(log.matches("--\n").count(), 2);
}

#[tokio::test]
async fn nonzero_exit_carries_stderr() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let ffmpeg = fake_ffmpeg(bin.path(), "echo 'in.mp4: No such file or directory' >&2\nexit 1");
    let editor = editor(ffmpeg, media.path());

    let result = editor.grayscale("in.mp4", media.path().join("out.mp4")).await;

    assert_matches!(
        result,
        Err(Error::Process { code: Some(1), ref message, .. }) if message.contains("No such file")
    );
}

#[tokio::test]
async fn slow_process_times_out() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let ffmpeg = fake_ffmpeg(bin.path(), "sleep 10");

    let mut config = Config::default();
    config.workspace.temp_root = Some(media.path().to_path_buf());
    let tool = ToolConfig::new("ffmpeg", ffmpeg).with_timeout(Duration::from_millis(200));
    let editor = Editor::with_runner(Arc::new(ProcessRunner), tool, config);

    let started = std::time::Instant::now();
    let result = editor.vertical_flip("in.mp4", media.path().join("out.mp4")).await;

    assert_matches!(result, Err(Error::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn from_config_uses_configured_path() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let (ffmpeg, _log) = recording_ffmpeg(bin.path());

    let mut config = Config::default();
    config.tools.ffmpeg_path = Some(ffmpeg.clone());
    config.workspace.temp_root = Some(media.path().to_path_buf());
    let editor = Editor::from_config(config).unwrap();

    assert_eq!(editor.context().ffmpeg.path, ffmpeg);
    editor
        .horizontal_flip("in.mp4", media.path().join("out.mp4"))
        .await
        .unwrap();
}

#[tokio::test]
async fn lingering_child_does_not_stretch_timeout() {
    let bin = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let ffmpeg = fake_ffmpeg(bin.path(), "sleep 6 &\nexit 0");

    let mut config = Config::default();
    config.workspace.temp_root = Some(media.path().to_path_buf());
    let tool = ToolConfig::new("ffmpeg", ffmpeg).with_timeout(Duration::from_millis(300));
    let editor = Editor::with_runner(Arc::new(ProcessRunner), tool, config);

    let started = std::time::Instant::now();
    let result = editor.vertical_flip("in.mp4", media.path().join("out.mp4")).await;

    assert_matches!(result, Err(Error::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
}
