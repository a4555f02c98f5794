//! Grayscale, hue/saturation, and vignette.

use serde::{Deserialize, Serialize};
use vf_core::VignetteEval;

use super::validate;

/// Neutral chroma planes, leaving only luma.
pub const GRAYSCALE_GRAPH: &str = "lutyuv=u=128:v=128";

/// Hue rotation, in degrees or radians. Both accept ffmpeg expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "unit", content = "value")]
pub enum HueAngle {
    Degrees(String),
    Radians(String),
}

impl Default for HueAngle {
    fn default() -> Self {
        Self::Degrees("0".into())
    }
}

/// Hue angle, saturation, and brightness adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hue {
    pub angle: HueAngle,
    /// Saturation in `[-10, 10]`; expression.
    pub saturation: String,
    /// Brightness in `[-10, 10]`; expression.
    pub brightness: String,
}

impl Default for Hue {
    fn default() -> Self {
        Self {
            angle: HueAngle::default(),
            saturation: "1".into(),
            brightness: "0".into(),
        }
    }
}

impl Hue {
    /// Rotate by `degrees`, keeping default saturation and brightness.
    pub fn degrees(degrees: impl Into<String>) -> Self {
        Self {
            angle: HueAngle::Degrees(degrees.into()),
            ..Self::default()
        }
    }

    /// Rotate by `radians`, keeping default saturation and brightness.
    pub fn radians(radians: impl Into<String>) -> Self {
        Self {
            angle: HueAngle::Radians(radians.into()),
            ..Self::default()
        }
    }

    /// Builder: set saturation.
    pub fn saturation(mut self, saturation: impl Into<String>) -> Self {
        self.saturation = saturation.into();
        self
    }

    /// Builder: set brightness.
    pub fn brightness(mut self, brightness: impl Into<String>) -> Self {
        self.brightness = brightness.into();
        self
    }

    pub fn validate(&self) -> vf_core::Result<()> {
        match &self.angle {
            HueAngle::Degrees(v) => validate::expression("hue", "h", v)?,
            HueAngle::Radians(v) => validate::expression("hue", "H", v)?,
        }
        validate::expression("hue", "s", &self.saturation)?;
        validate::expression("hue", "b", &self.brightness)
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let angle = match &self.angle {
            HueAngle::Degrees(v) => ("h", v.clone()),
            HueAngle::Radians(v) => ("H", v.clone()),
        };
        vec![
            angle,
            ("s", self.saturation.clone()),
            ("b", self.brightness.clone()),
        ]
    }
}

/// Natural vignetting, or its reversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vignette {
    /// Lens angle expression, in radians.
    pub angle: String,
    pub eval: VignetteEval,
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            angle: "PI/4".into(),
            eval: VignetteEval::Init,
        }
    }
}

impl Vignette {
    pub fn validate(&self) -> vf_core::Result<()> {
        validate::expression("vignette", "angle", &self.angle)
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("angle", self.angle.clone()),
            ("eval", self.eval.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_defaults() {
        let hue = Hue::default();
        assert_eq!(
            hue.params(),
            vec![
                ("h", "0".to_string()),
                ("s", "1".to_string()),
                ("b", "0".to_string()),
            ]
        );
    }

    #[test]
    fn hue_radians_switches_key() {
        let hue = Hue::radians("PI/2").saturation("2");
        assert_eq!(hue.params()[0], ("H", "PI/2".to_string()));
        assert_eq!(hue.params()[1], ("s", "2".to_string()));
    }

    #[test]
    fn hue_expression_with_time() {
        let hue = Hue::degrees("90*t").brightness("sin(t)");
        assert!(hue.validate().is_ok());
    }

    #[test]
    fn hue_rejects_option_smuggling() {
        let hue = Hue::degrees("0:s=0");
        assert!(hue.validate().is_err());
    }

    #[test]
    fn vignette_defaults() {
        let v = Vignette::default();
        assert_eq!(v.angle, "PI/4");
        assert_eq!(v.eval, VignetteEval::Init);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn vignette_rejects_quotes() {
        let v = Vignette {
            angle: "'PI/4'".into(),
            ..Vignette::default()
        };
        assert!(v.validate().is_err());
    }

    #[test]
    fn hue_angle_serde() {
        let json = serde_json::to_string(&HueAngle::Radians("PI".into())).unwrap();
        assert_eq!(json, r#"{"unit":"radians","value":"PI"}"#);
    }
}
