//! Second stage of two-stage filters: transcode the intermediate into the
//! caller's output container.

use std::path::Path;

use crate::command::ToolOutput;
use crate::context::ActionContext;

/// Transcode `intermediate` into `output`, letting ffmpeg pick codecs from
/// the output extension.
pub async fn remux(
    ctx: &ActionContext,
    intermediate: &Path,
    output: &Path,
) -> vf_core::Result<ToolOutput> {
    tracing::info!("remux {:?} -> {:?}", intermediate, output);

    let mut cmd = ctx.ffmpeg_command();
    cmd.arg("-i").path_arg(intermediate);
    cmd.path_arg(output);
    ctx.run("remux", &cmd).await
}
