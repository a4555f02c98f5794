//! Turn a still image into a clip of fixed length.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vf_core::Error;

use crate::actions::{seconds, EditResult};
use crate::context::ActionContext;
use crate::filters::{validate, Filter};

/// A looping still image rendered as a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicToMovie {
    pub image: PathBuf,
    pub output: PathBuf,
    /// Length of the clip.
    pub duration: Duration,
    /// Optional visual filter applied while rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl PicToMovie {
    pub fn new(image: impl Into<PathBuf>, output: impl Into<PathBuf>, duration: Duration) -> Self {
        Self {
            image: image.into(),
            output: output.into(),
            duration,
            filter: None,
        }
    }

    /// Builder: apply `filter` to every frame.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn validate(&self) -> vf_core::Result<()> {
        validate::path("pic_to_movie", "image", &self.image)?;
        validate::path("pic_to_movie", "output", &self.output)?;
        if self.duration.is_zero() {
            return Err(Error::invalid("pic_to_movie", "duration", "must be positive"));
        }
        if let Some(ref filter) = self.filter {
            filter.validate()?;
        }
        Ok(())
    }
}

/// Render `request.image` as a `request.duration` long clip.
///
/// Any catalog filter can be applied; two-stage filters are applied inline
/// since the still image needs no intermediate.
pub async fn pic_to_movie(ctx: &ActionContext, request: &PicToMovie) -> vf_core::Result<EditResult> {
    request.validate()?;

    tracing::info!(
        "pic_to_movie {:?} -> {:?} ({:?}, filter={:?})",
        request.image,
        request.output,
        request.duration,
        request.filter.as_ref().map(Filter::name),
    );

    let mut cmd = ctx.ffmpeg_command();
    cmd.args(["-loop", "1", "-i"]);
    cmd.path_arg(&request.image);
    if let Some(ref filter) = request.filter {
        cmd.args(["-vf".to_string(), filter.graph()]);
    }
    cmd.args(["-t".to_string(), seconds(request.duration)]);
    cmd.path_arg(&request.output);

    let step = ctx.run("pic_to_movie", &cmd).await?;
    Ok(EditResult::new(Path::new(&request.output), vec![step]))
}
