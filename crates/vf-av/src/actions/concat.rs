//! Concatenate clips through the concat protocol, then re-encode.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vf_core::Error;

use crate::actions::{seconds, EditResult, INTERMEDIATE_EXT};
use crate::context::ActionContext;
use crate::filters::validate;

/// Several clips joined end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concat {
    /// Clips, in playback order.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Drop the clips' own audio.
    #[serde(default)]
    pub strip_audio: bool,
    /// Replacement audio track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<PathBuf>,
    /// Truncate the result to this length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

impl Concat {
    pub fn new(inputs: impl IntoIterator<Item = impl Into<PathBuf>>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: output.into(),
            strip_audio: false,
            audio: None,
            duration: None,
        }
    }

    /// Builder: drop the clips' audio.
    pub fn strip_audio(mut self) -> Self {
        self.strip_audio = true;
        self
    }

    /// Builder: use `audio` as the soundtrack.
    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Builder: stop after `duration`.
    pub fn truncate(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn validate(&self) -> vf_core::Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::invalid("concat", "inputs", "at least one input is required"));
        }
        validate::path("concat", "output", &self.output)?;
        if let Some(ref audio) = self.audio {
            validate::path("concat", "audio", audio)?;
        }
        if self.duration.is_some_and(|d| d.is_zero()) {
            return Err(Error::invalid("concat", "duration", "must be positive"));
        }
        concat_spec(&self.inputs).map(|_| ())
    }
}

/// The concat protocol URL for `inputs`: `concat:a|b|c`, in order.
pub fn concat_spec(inputs: &[PathBuf]) -> vf_core::Result<String> {
    let mut parts = Vec::with_capacity(inputs.len());
    for input in inputs {
        validate::path("concat", "inputs", input)?;
        let s = input.to_string_lossy();
        if s.contains('|') {
            return Err(Error::invalid(
                "concat",
                "inputs",
                format!("{s} contains '|', which the concat protocol cannot express"),
            ));
        }
        parts.push(s.into_owned());
    }
    Ok(format!("concat:{}", parts.join("|")))
}

/// Join `request.inputs` into `request.output`.
///
/// Stage one stream-copies the joined inputs into an intermediate inside a
/// fresh workspace; stage two re-encodes it at the configured bitrates,
/// applying the audio and duration options. The intermediate is removed on
/// every exit path.
pub async fn concat_videos(ctx: &ActionContext, request: &Concat) -> vf_core::Result<EditResult> {
    request.validate()?;
    let spec = concat_spec(&request.inputs)?;

    tracing::info!(
        "concat {} inputs -> {:?} (strip_audio={}, audio={:?}, duration={:?})",
        request.inputs.len(),
        request.output,
        request.strip_audio,
        request.audio,
        request.duration,
    );

    let workspace = ctx.workspace()?;
    let intermediate = workspace.intermediate(INTERMEDIATE_EXT);

    let mut join = ctx.ffmpeg_command();
    join.args(["-i".to_string(), spec]);
    join.args(["-c", "copy"]);
    join.path_arg(&intermediate);
    let first = ctx.run("concat", &join).await?;

    let encode = encode_command(ctx, request, &intermediate);
    let second = ctx.run("concat encode", &encode).await?;

    workspace.close();
    Ok(EditResult::new(Path::new(&request.output), vec![first, second]))
}

fn encode_command(
    ctx: &ActionContext,
    request: &Concat,
    intermediate: &Path,
) -> crate::command::ToolCommand {
    let encode = &ctx.config.encode;
    let mut cmd = ctx.ffmpeg_command();
    cmd.arg("-i").path_arg(intermediate);

    let keep_audio = match request.audio {
        Some(ref audio) => {
            cmd.arg("-i").path_arg(audio);
            cmd.args(["-map", "0:v", "-map", "1:a"]);
            true
        }
        None if request.strip_audio => {
            cmd.arg("-an");
            false
        }
        None => true,
    };

    if let Some(d) = request.duration {
        cmd.args(["-t".to_string(), seconds(d)]);
    }
    if keep_audio {
        cmd.args(["-b:a", encode.audio_bitrate.as_str()]);
    }
    cmd.args(["-b:v", encode.video_bitrate.as_str()]);
    cmd.path_arg(&request.output);
    cmd
}
