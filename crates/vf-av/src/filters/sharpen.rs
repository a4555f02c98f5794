//! Unsharp masking and box blur.

use serde::{Deserialize, Serialize};

use super::validate;

/// Unsharp mask; a negative amount blurs instead of sharpening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unsharp {
    /// Luma matrix width; odd, `[3, 63]`.
    pub luma_msize_x: u32,
    /// Luma matrix height; odd, `[3, 63]`.
    pub luma_msize_y: u32,
    /// Luma strength; sensible values sit in `[-1.5, 1.5]`.
    pub luma_amount: f64,
    pub chroma_msize_x: u32,
    pub chroma_msize_y: u32,
    pub chroma_amount: f64,
}

impl Default for Unsharp {
    fn default() -> Self {
        Self {
            luma_msize_x: 5,
            luma_msize_y: 5,
            luma_amount: 1.0,
            chroma_msize_x: 5,
            chroma_msize_y: 5,
            chroma_amount: 0.0,
        }
    }
}

impl Unsharp {
    pub fn validate(&self) -> vf_core::Result<()> {
        for (param, size) in [
            ("luma_msize_x", self.luma_msize_x),
            ("luma_msize_y", self.luma_msize_y),
            ("chroma_msize_x", self.chroma_msize_x),
            ("chroma_msize_y", self.chroma_msize_y),
        ] {
            validate::odd_in_range("unsharp", param, size, 3, 63)?;
        }
        validate::in_range("unsharp", "luma_amount", self.luma_amount, -2.0, 5.0)?;
        validate::in_range("unsharp", "chroma_amount", self.chroma_amount, -2.0, 5.0)
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("luma_msize_x", self.luma_msize_x.to_string()),
            ("luma_msize_y", self.luma_msize_y.to_string()),
            ("luma_amount", self.luma_amount.to_string()),
            ("chroma_msize_x", self.chroma_msize_x.to_string()),
            ("chroma_msize_y", self.chroma_msize_y.to_string()),
            ("chroma_amount", self.chroma_amount.to_string()),
        ]
    }
}

/// Box blur with independent radius and power per plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxBlur {
    pub luma_radius: u32,
    pub luma_power: u32,
    pub chroma_radius: u32,
    pub chroma_power: u32,
    pub alpha_radius: u32,
    pub alpha_power: u32,
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self {
            luma_radius: 2,
            luma_power: 2,
            chroma_radius: 2,
            chroma_power: 2,
            alpha_radius: 2,
            alpha_power: 2,
        }
    }
}

impl BoxBlur {
    /// The same radius and power on every plane.
    pub fn uniform(radius: u32, power: u32) -> Self {
        Self {
            luma_radius: radius,
            luma_power: power,
            chroma_radius: radius,
            chroma_power: power,
            alpha_radius: radius,
            alpha_power: power,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("luma_radius", self.luma_radius.to_string()),
            ("luma_power", self.luma_power.to_string()),
            ("chroma_radius", self.chroma_radius.to_string()),
            ("chroma_power", self.chroma_power.to_string()),
            ("alpha_radius", self.alpha_radius.to_string()),
            ("alpha_power", self.alpha_power.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsharp_defaults() {
        let params = Unsharp::default().params();
        assert!(params.contains(&("luma_msize_x", "5".to_string())));
        assert!(params.contains(&("luma_amount", "1".to_string())));
        assert!(params.contains(&("chroma_amount", "0".to_string())));
        assert!(Unsharp::default().validate().is_ok());
    }

    #[test]
    fn unsharp_rejects_even_matrix() {
        let u = Unsharp {
            chroma_msize_y: 6,
            ..Unsharp::default()
        };
        let err = u.validate().unwrap_err().to_string();
        assert!(err.contains("chroma_msize_y"), "{err}");
    }

    #[test]
    fn unsharp_rejects_oversized_matrix() {
        let u = Unsharp {
            luma_msize_x: 65,
            ..Unsharp::default()
        };
        assert!(u.validate().is_err());
    }

    #[test]
    fn unsharp_negative_amount_blurs() {
        let u = Unsharp {
            luma_amount: -1.5,
            ..Unsharp::default()
        };
        assert!(u.validate().is_ok());
        assert!(u.params().contains(&("luma_amount", "-1.5".to_string())));
    }

    #[test]
    fn box_blur_uniform() {
        let b = BoxBlur::uniform(5, 1);
        assert_eq!(b.alpha_radius, 5);
        assert_eq!(b.chroma_power, 1);
        assert_eq!(BoxBlur::default(), BoxBlur::uniform(2, 2));
    }
}
