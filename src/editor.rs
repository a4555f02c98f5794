//! The [`Editor`]: one async method per editing operation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vf_av::actions;
use vf_av::{
    ActionContext, BoxBlur, CommandRunner, Concat, Crop, DrawBox, EdgeDetect, EditResult, Fade,
    Filter, Hue, PicToMovie, ProcessRunner, ToolConfig, ToolRegistry, Unsharp, Vignette,
};
use vf_core::config::Config;

/// Runs editing operations against one ffmpeg installation.
///
/// Cloning is cheap; clones share the runner, config, and cancellation token.
#[derive(Debug, Clone)]
pub struct Editor {
    ctx: ActionContext,
}

impl Editor {
    /// Discover ffmpeg per `config.tools` and spawn real processes.
    pub fn from_config(config: Config) -> vf_core::Result<Self> {
        for warning in config.validate() {
            tracing::warn!("config: {warning}");
        }
        let registry = ToolRegistry::discover(&config.tools);
        let ffmpeg = registry.require("ffmpeg")?.clone();
        tracing::info!("using ffmpeg at {}", ffmpeg.path.display());
        Ok(Self::with_runner(Arc::new(ProcessRunner), ffmpeg, config))
    }

    /// Use an explicit runner and ffmpeg location.
    pub fn with_runner(runner: Arc<dyn CommandRunner>, ffmpeg: ToolConfig, config: Config) -> Self {
        Self {
            ctx: ActionContext::new(runner, ffmpeg, Arc::new(config)),
        }
    }

    /// Builder: cancel in-flight and future operations through `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.ctx = self.ctx.with_cancellation(token);
        self
    }

    pub fn context(&self) -> &ActionContext {
        &self.ctx
    }

    /// Apply any catalog filter.
    pub async fn apply(
        &self,
        filter: impl Into<Filter>,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        actions::apply_filter(&self.ctx, &filter.into(), input.as_ref(), output.as_ref()).await
    }

    pub async fn fade(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        fade: Fade,
    ) -> vf_core::Result<EditResult> {
        self.apply(fade, input, output).await
    }

    pub async fn grayscale(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::Grayscale, input, output).await
    }

    pub async fn unsharp(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        unsharp: Unsharp,
    ) -> vf_core::Result<EditResult> {
        self.apply(unsharp, input, output).await
    }

    pub async fn vignette(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        vignette: Vignette,
    ) -> vf_core::Result<EditResult> {
        self.apply(vignette, input, output).await
    }

    pub async fn crop(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        crop: Crop,
    ) -> vf_core::Result<EditResult> {
        self.apply(crop, input, output).await
    }

    pub async fn hue(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        hue: Hue,
    ) -> vf_core::Result<EditResult> {
        self.apply(hue, input, output).await
    }

    pub async fn box_blur(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        blur: BoxBlur,
    ) -> vf_core::Result<EditResult> {
        self.apply(blur, input, output).await
    }

    /// Left half kept, right half replaced by its mirror image.
    pub async fn mirror_flip(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::MirrorFlip, input, output).await
    }

    pub async fn horizontal_flip(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::HorizontalFlip, input, output).await
    }

    pub async fn vertical_flip(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::VerticalFlip, input, output).await
    }

    pub async fn draw_box(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        draw_box: DrawBox,
    ) -> vf_core::Result<EditResult> {
        self.apply(draw_box, input, output).await
    }

    /// Embossed grayscale. Runs two ffmpeg stages.
    pub async fn relief(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::Relief, input, output).await
    }

    /// Edge-detected line drawing. Runs two ffmpeg stages.
    pub async fn line(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        edges: EdgeDetect,
    ) -> vf_core::Result<EditResult> {
        self.apply(edges, input, output).await
    }

    /// Pass a caller-built filter graph through as `-vf`.
    pub async fn custom(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        graph: impl Into<String>,
    ) -> vf_core::Result<EditResult> {
        self.apply(Filter::Custom(graph.into()), input, output).await
    }

    /// Render a still image as a clip lasting `duration`, optionally filtered.
    pub async fn pic_to_movie(
        &self,
        image: impl AsRef<Path>,
        output: impl AsRef<Path>,
        duration: Duration,
        filter: Option<Filter>,
    ) -> vf_core::Result<EditResult> {
        let mut request = PicToMovie::new(image.as_ref(), output.as_ref(), duration);
        request.filter = filter;
        actions::pic_to_movie(&self.ctx, &request).await
    }

    /// Join clips end to end; see [`Concat`] for the audio and length options.
    pub async fn concat_videos(&self, request: &Concat) -> vf_core::Result<EditResult> {
        actions::concat_videos(&self.ctx, request).await
    }
}
