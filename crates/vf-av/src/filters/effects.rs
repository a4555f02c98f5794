//! Fade, relief, and edge detection.

use serde::{Deserialize, Serialize};
use vf_core::{EdgeMode, Error, FadeDirection};

use super::validate;

/// Gray emboss: each luma sample averaged with the inverse of its
/// up-left neighbour four pixels away.
pub const RELIEF_GRAPH: &str = r"format=gray,geq=lum_expr=(p(X\,Y)+(256-p(X-4\,Y-4)))/2";

/// Fade in from (or out to) black over a run of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fade {
    pub direction: FadeDirection,
    /// First frame of the fade.
    pub start_frame: u32,
    /// Number of frames the fade lasts.
    pub nb_frames: u32,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            direction: FadeDirection::In,
            start_frame: 0,
            nb_frames: 25,
        }
    }
}

impl Fade {
    pub fn new(start_frame: u32, nb_frames: u32) -> Self {
        Self {
            start_frame,
            nb_frames,
            ..Self::default()
        }
    }

    /// Builder: fade out instead of in.
    pub fn out(mut self) -> Self {
        self.direction = FadeDirection::Out;
        self
    }

    pub fn validate(&self) -> vf_core::Result<()> {
        if self.nb_frames == 0 {
            return Err(Error::invalid("fade", "nb_frames", "must be at least 1"));
        }
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.direction.to_string()),
            ("start_frame", self.start_frame.to_string()),
            ("nb_frames", self.nb_frames.to_string()),
        ]
    }
}

/// Sobel/Canny edge detection, drawn as wires or mixed with the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDetect {
    /// Low hysteresis threshold, in `[0, 1]`.
    pub low: f64,
    /// High hysteresis threshold, in `[0, 1]`.
    pub high: f64,
    pub mode: EdgeMode,
}

impl Default for EdgeDetect {
    fn default() -> Self {
        Self {
            low: 0.1,
            high: 0.4,
            mode: EdgeMode::Wires,
        }
    }
}

impl EdgeDetect {
    pub fn validate(&self) -> vf_core::Result<()> {
        validate::in_range("edgedetect", "low", self.low, 0.0, 1.0)?;
        validate::in_range("edgedetect", "high", self.high, 0.0, 1.0)?;
        if self.low > self.high {
            return Err(Error::invalid(
                "edgedetect",
                "low",
                format!("{} is above high ({})", self.low, self.high),
            ));
        }
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("low", self.low.to_string()),
            ("high", self.high.to_string()),
            ("mode", self.mode.to_string()),
        ]
    }
}
