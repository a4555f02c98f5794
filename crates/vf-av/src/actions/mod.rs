//! Media processing actions: filtering, intermediate remuxing, still image
//! to clip, and concatenation.
//!
//! Every action returns an [`EditResult`], whether it ran one ffmpeg stage
//! or two.

mod concat;
mod filter;
mod pic_to_movie;
mod remux;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::ToolOutput;

pub use concat::{concat_spec, concat_videos, Concat};
pub use filter::apply_filter;
pub use pic_to_movie::{pic_to_movie, PicToMovie};
pub use remux::remux;

/// Container of the file handed from the first stage to the second.
pub const INTERMEDIATE_EXT: &str = "ts";

/// Outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Where the final artifact was written.
    pub output: PathBuf,
    /// Captured output of every stage, in execution order.
    pub steps: Vec<ToolOutput>,
}

impl EditResult {
    pub(crate) fn new(output: &Path, steps: Vec<ToolOutput>) -> Self {
        Self {
            output: output.to_path_buf(),
            steps,
        }
    }

    /// Standard output of the final stage.
    pub fn stdout(&self) -> &str {
        self.steps.last().map(|s| s.stdout.as_str()).unwrap_or_default()
    }

    /// Standard error of every stage, joined by newlines.
    pub fn diagnostics(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.stderr.trim_end())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a duration the way `-t` takes it: seconds, fractional if needed.
pub(crate) fn seconds(d: Duration) -> String {
    d.as_secs_f64().to_string()
}
