//! Media-domain enums used by filter parameters.
//!
//! All enums serialize in lowercase (via `serde(rename_all = "lowercase")`)
//! and implement `Display` with the exact token ffmpeg expects.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FadeDirection
// ---------------------------------------------------------------------------

/// Whether a fade goes from black to picture or picture to black.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeDirection {
    #[default]
    In,
    Out,
}

impl fmt::Display for FadeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

// ---------------------------------------------------------------------------
// VignetteEval
// ---------------------------------------------------------------------------

/// When the vignette expressions are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VignetteEval {
    /// Once, at filter initialization.
    #[default]
    Init,
    /// For every frame.
    Frame,
}

impl fmt::Display for VignetteEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeMode
// ---------------------------------------------------------------------------

/// Drawing mode of the edge-detection filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// White/gray wires on a black background.
    #[default]
    Wires,
    /// Edges mixed with the source colors.
    Colormix,
    /// Canny edge detector.
    Canny,
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wires => write!(f, "wires"),
            Self::Colormix => write!(f, "colormix"),
            Self::Canny => write!(f, "canny"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        assert_eq!(FadeDirection::Out.to_string(), "out");
        assert_eq!(serde_json::to_string(&FadeDirection::Out).unwrap(), "\"out\"");
        assert_eq!(VignetteEval::Frame.to_string(), "frame");
        assert_eq!(serde_json::to_string(&VignetteEval::Frame).unwrap(), "\"frame\"");
        assert_eq!(EdgeMode::Colormix.to_string(), "colormix");
        assert_eq!(serde_json::to_string(&EdgeMode::Colormix).unwrap(), "\"colormix\"");
    }

    #[test]
    fn defaults() {
        assert_eq!(FadeDirection::default(), FadeDirection::In);
        assert_eq!(VignetteEval::default(), VignetteEval::Init);
        assert_eq!(EdgeMode::default(), EdgeMode::Wires);
    }

    #[test]
    fn deserialize_lowercase() {
        let mode: EdgeMode = serde_json::from_str("\"canny\"").unwrap();
        assert_eq!(mode, EdgeMode::Canny);
    }
}
