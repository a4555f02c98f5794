//! Cropping, box drawing, and the mirror composite.

use serde::{Deserialize, Serialize};

use super::validate;

/// Left half of the frame next to its own horizontal reflection.
pub const MIRROR_GRAPH: &str =
    "crop=iw/2:ih:0:0,split[left][tmp];[tmp]hflip[right];[left]pad=iw*2[a];[a][right]overlay=w";

/// Crop a rectangle out of the frame. All fields accept ffmpeg expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crop {
    /// Output width.
    pub width: String,
    /// Output height.
    pub height: String,
    /// Left edge, evaluated per frame.
    pub x: String,
    /// Top edge, evaluated per frame.
    pub y: String,
    /// Force the output display aspect ratio to match the input.
    pub keep_aspect: bool,
}

impl Default for Crop {
    fn default() -> Self {
        Self {
            width: "iw".into(),
            height: "ih".into(),
            x: "(in_w-out_w)/2".into(),
            y: "(in_h-out_h)/2".into(),
            keep_aspect: false,
        }
    }
}

impl Crop {
    /// A centered `width` x `height` crop.
    pub fn centered(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
            ..Self::default()
        }
    }

    /// Builder: set the top-left corner.
    pub fn at(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    pub fn validate(&self) -> vf_core::Result<()> {
        validate::expression("crop", "w", &self.width)?;
        validate::expression("crop", "h", &self.height)?;
        validate::expression("crop", "x", &self.x)?;
        validate::expression("crop", "y", &self.y)
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("w", self.width.clone()),
            ("h", self.height.clone()),
            ("x", self.x.clone()),
            ("y", self.y.clone()),
            ("keep_aspect", u8::from(self.keep_aspect).to_string()),
        ]
    }
}

/// A colored, semi-transparent rectangle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Color name or `#rrggbb`.
    pub color: String,
    /// Alpha in `[0, 1]`.
    pub opacity: f64,
    /// Border thickness in pixels.
    pub thickness: u32,
}

impl Default for DrawBox {
    fn default() -> Self {
        Self {
            x: 10,
            y: 10,
            width: 100,
            height: 100,
            color: "red".into(),
            opacity: 0.5,
            thickness: 2,
        }
    }
}

impl DrawBox {
    pub fn validate(&self) -> vf_core::Result<()> {
        validate::token("drawbox", "color", &self.color)?;
        validate::in_range("drawbox", "opacity", self.opacity, 0.0, 1.0)
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("color", format!("{}@{}", self.color, self.opacity)),
            ("t", self.thickness.to_string()),
        ]
    }
}
