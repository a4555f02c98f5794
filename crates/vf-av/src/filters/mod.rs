//! The filter catalog: typed parameters, defaults, validation, and the
//! ffmpeg `-vf` argument each filter renders to.
//!
//! Keyed filters render as `name=key=value:key=value` with the parameters in
//! the order [`Filter::params`] returns them, so every supplied value appears
//! verbatim in its slot.

mod color;
mod effects;
mod geometry;
mod sharpen;
pub(crate) mod validate;

use serde::{Deserialize, Serialize};

pub use color::{Hue, HueAngle, Vignette, GRAYSCALE_GRAPH};
pub use effects::{EdgeDetect, Fade, RELIEF_GRAPH};
pub use geometry::{Crop, DrawBox, MIRROR_GRAPH};
pub use sharpen::{BoxBlur, Unsharp};

/// How many ffmpeg runs a filter takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stages {
    /// Filter straight from input to output.
    Single,
    /// Filter into an intermediate MPEG-TS file, then transcode that into
    /// the output.
    Remux,
}

/// A video filter with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "filter", content = "params")]
pub enum Filter {
    Fade(Fade),
    Grayscale,
    Unsharp(Unsharp),
    Vignette(Vignette),
    Crop(Crop),
    Hue(Hue),
    BoxBlur(BoxBlur),
    MirrorFlip,
    HorizontalFlip,
    VerticalFlip,
    DrawBox(DrawBox),
    Relief,
    EdgeDetect(EdgeDetect),
    /// A caller-supplied filter graph, passed through untouched.
    Custom(String),
}

/// Everything needed to describe one filter invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDescriptor {
    pub name: &'static str,
    /// Parameters with defaults applied, in graph order.
    pub params: Vec<(&'static str, String)>,
    /// The rendered `-vf` argument.
    pub graph: String,
    pub stages: Stages,
}

impl Filter {
    /// The ffmpeg filter name (or the operation name for composites).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fade(_) => "fade",
            Self::Grayscale => "lutyuv",
            Self::Unsharp(_) => "unsharp",
            Self::Vignette(_) => "vignette",
            Self::Crop(_) => "crop",
            Self::Hue(_) => "hue",
            Self::BoxBlur(_) => "boxblur",
            Self::MirrorFlip => "mirror",
            Self::HorizontalFlip => "hflip",
            Self::VerticalFlip => "vflip",
            Self::DrawBox(_) => "drawbox",
            Self::Relief => "relief",
            Self::EdgeDetect(_) => "edgedetect",
            Self::Custom(_) => "custom",
        }
    }

    /// Reject parameters ffmpeg would refuse (or misparse) before any
    /// process is started.
    pub fn validate(&self) -> vf_core::Result<()> {
        match self {
            Self::Fade(f) => f.validate(),
            Self::Unsharp(f) => f.validate(),
            Self::Vignette(f) => f.validate(),
            Self::Crop(f) => f.validate(),
            Self::Hue(f) => f.validate(),
            Self::DrawBox(f) => f.validate(),
            Self::EdgeDetect(f) => f.validate(),
            Self::Custom(graph) if graph.trim().is_empty() => Err(vf_core::Error::invalid(
                "custom",
                "graph",
                "filter graph is empty",
            )),
            _ => Ok(()),
        }
    }

    /// Parameters with defaults applied, in graph order. Empty for fixed
    /// filters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Fade(f) => f.params(),
            Self::Unsharp(f) => f.params(),
            Self::Vignette(f) => f.params(),
            Self::Crop(f) => f.params(),
            Self::Hue(f) => f.params(),
            Self::BoxBlur(f) => f.params(),
            Self::DrawBox(f) => f.params(),
            Self::EdgeDetect(f) => f.params(),
            _ => Vec::new(),
        }
    }

    /// The `-vf` argument for this filter.
    pub fn graph(&self) -> String {
        match self {
            Self::Grayscale => GRAYSCALE_GRAPH.to_string(),
            Self::MirrorFlip => MIRROR_GRAPH.to_string(),
            Self::HorizontalFlip => "hflip".to_string(),
            Self::VerticalFlip => "vflip".to_string(),
            Self::Relief => RELIEF_GRAPH.to_string(),
            Self::Custom(graph) => graph.clone(),
            keyed => render_keyed(keyed.name(), &keyed.params()),
        }
    }

    /// Relief and edge detection go through an intermediate container.
    pub fn stages(&self) -> Stages {
        match self {
            Self::Relief | Self::EdgeDetect(_) => Stages::Remux,
            _ => Stages::Single,
        }
    }

    pub fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor {
            name: self.name(),
            params: self.params(),
            graph: self.graph(),
            stages: self.stages(),
        }
    }
}

fn render_keyed(name: &str, params: &[(&'static str, String)]) -> String {
    let options: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{name}={}", options.join(":"))
}

impl From<Fade> for Filter {
    fn from(f: Fade) -> Self {
        Self::Fade(f)
    }
}

impl From<Unsharp> for Filter {
    fn from(f: Unsharp) -> Self {
        Self::Unsharp(f)
    }
}

impl From<Vignette> for Filter {
    fn from(f: Vignette) -> Self {
        Self::Vignette(f)
    }
}

impl From<Crop> for Filter {
    fn from(f: Crop) -> Self {
        Self::Crop(f)
    }
}

impl From<Hue> for Filter {
    fn from(f: Hue) -> Self {
        Self::Hue(f)
    }
}

impl From<BoxBlur> for Filter {
    fn from(f: BoxBlur) -> Self {
        Self::BoxBlur(f)
    }
}

impl From<DrawBox> for Filter {
    fn from(f: DrawBox) -> Self {
        Self::DrawBox(f)
    }
}

impl From<EdgeDetect> for Filter {
    fn from(f: EdgeDetect) -> Self {
        Self::EdgeDetect(f)
    }
}
