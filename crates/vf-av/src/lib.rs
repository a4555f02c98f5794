//! # vf-av
//!
//! ffmpeg orchestration for the vidfx editor.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find ffmpeg on `PATH` or at a
//!   configured location.
//! - **Command execution** ([`ToolCommand`], [`CommandRunner`]) -- argument
//!   vector builder with timeout and cancellation, behind a runner trait so
//!   tests can record instead of spawn.
//! - **Workspace management** ([`Workspace`]) -- per-call temporary
//!   directory holding intermediates, removed on drop.
//! - **Filter catalog** ([`filters`]) -- typed, validated filter parameters
//!   and the `-vf` graph each renders to.
//! - **Action functions** ([`actions`]) -- apply a filter, turn a still image
//!   into a clip, concatenate clips.

pub mod actions;
pub mod command;
pub mod context;
pub mod filters;
pub mod runner;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput, DEFAULT_TIMEOUT};
pub use context::ActionContext;
pub use runner::{CommandRunner, ProcessRunner};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
pub use workspace::Workspace;

pub use filters::{
    BoxBlur, Crop, DrawBox, EdgeDetect, Fade, Filter, FilterDescriptor, Hue, HueAngle, Stages,
    Unsharp, Vignette,
};

// Action functions
pub use actions::{
    apply_filter, concat_spec, concat_videos, pic_to_movie, remux, Concat, EditResult, PicToMovie,
};
