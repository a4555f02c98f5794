//! vidfx - video effects and editing on top of ffmpeg
//!
//! The [`Editor`] exposes one async method per operation: the filter catalog
//! (fade, grayscale, unsharp, vignette, crop, hue, box blur, mirror and flips,
//! draw box, relief, line drawing, custom graphs), still image to clip, and
//! clip concatenation. Each returns an [`EditResult`].

mod editor;
mod telemetry;

pub use editor::Editor;
pub use telemetry::init_tracing;

pub use vf_av::{
    concat_spec, filters, ActionContext, BoxBlur, CommandRunner, Concat, Crop, DrawBox, EdgeDetect,
    EditResult, Fade, Filter, FilterDescriptor, Hue, HueAngle, PicToMovie, ProcessRunner, Stages,
    ToolCommand, ToolConfig, ToolOutput, ToolRegistry, Unsharp, Vignette,
};
pub use vf_core::config::Config;
pub use vf_core::{EdgeMode, Error, FadeDirection, Result, VignetteEval};
