//! Apply one catalog filter to a video.

use std::path::Path;

use crate::actions::{remux, EditResult, INTERMEDIATE_EXT};
use crate::command::ToolOutput;
use crate::context::ActionContext;
use crate::filters::{validate, Filter, Stages};

/// Apply `filter` to `input`, writing `output`.
///
/// Single-stage filters run one ffmpeg process. Two-stage filters first
/// write an intermediate MPEG-TS file inside a fresh workspace and then
/// transcode it into `output`; the workspace (and the intermediate with it)
/// is removed whether or not the second stage succeeds.
pub async fn apply_filter(
    ctx: &ActionContext,
    filter: &Filter,
    input: &Path,
    output: &Path,
) -> vf_core::Result<EditResult> {
    filter.validate()?;
    validate::path(filter.name(), "input", input)?;
    validate::path(filter.name(), "output", output)?;

    let graph = filter.graph();
    tracing::info!("filter {} {:?} -> {:?}", filter.name(), input, output);

    match filter.stages() {
        Stages::Single => {
            let step = run_graph(ctx, filter.name(), &graph, input, output).await?;
            Ok(EditResult::new(output, vec![step]))
        }
        Stages::Remux => {
            let workspace = ctx.workspace()?;
            let intermediate = workspace.intermediate(INTERMEDIATE_EXT);

            let first = run_graph(ctx, filter.name(), &graph, input, &intermediate).await?;
            let second = remux(ctx, &intermediate, output).await?;

            workspace.close();
            Ok(EditResult::new(output, vec![first, second]))
        }
    }
}

async fn run_graph(
    ctx: &ActionContext,
    step: &str,
    graph: &str,
    input: &Path,
    output: &Path,
) -> vf_core::Result<ToolOutput> {
    let mut cmd = ctx.ffmpeg_command();
    cmd.arg("-i").path_arg(input);
    cmd.args(["-vf", graph]);
    cmd.path_arg(output);
    ctx.run(step, &cmd).await
}
