use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sf_filter::GaborParams;

use crate::error::FeatureError;
use crate::pyramids::min_side_for_levels;

/// Upper bound on `pyramid_levels`; deeper pyramids would need images wider
/// than `2^32` pixels.
pub const MAX_PYRAMID_LEVELS: usize = 32;

/// Default canonical grid: 32 columns by 28 rows.
pub const CANONICAL_SIZE: CanonicalSize = CanonicalSize {
    width: 32,
    height: 28,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSize {
    pub width: usize,
    pub height: usize,
}

impl Default for CanonicalSize {
    fn default() -> Self {
        CANONICAL_SIZE
    }
}

/// Which channel groups are computed.
///
/// Parsed from a letter string: `C` or `D` for color opponency (`CRG`,
/// `CBY`), `I` for intensity and `O` for orientation. `"DIO"` and `"CIO"` both
/// select everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureChannels {
    pub color: bool,
    pub intensity: bool,
    pub orientation: bool,
}

impl FeatureChannels {
    pub const ALL: Self = Self {
        color: true,
        intensity: true,
        orientation: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.color || self.intensity || self.orientation)
    }
}

impl Default for FeatureChannels {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromStr for FeatureChannels {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = Self {
            color: false,
            intensity: false,
            orientation: false,
        };

        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'C' | 'D' => out.color = true,
                'I' => out.intensity = true,
                'O' => out.orientation = true,
                other => {
                    return Err(FeatureError::Configuration(format!(
                        "unknown feature channel '{other}' in \"{s}\""
                    )));
                }
            }
        }

        if out.is_empty() {
            return Err(FeatureError::Configuration(
                "at least one feature channel must be selected".into(),
            ));
        }
        Ok(out)
    }
}

impl TryFrom<String> for FeatureChannels {
    type Error = FeatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FeatureChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.color {
            f.write_str("C")?;
        }
        if self.intensity {
            f.write_str("I")?;
        }
        if self.orientation {
            f.write_str("O")?;
        }
        Ok(())
    }
}

impl From<FeatureChannels> for String {
    fn from(value: FeatureChannels) -> Self {
        value.to_string()
    }
}

/// Per-group weights handed to the fusion stage. Not applied here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelWeights {
    pub color: f32,
    pub intensity: f32,
    pub orientation: f32,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            color: 1.0,
            intensity: 1.0,
            orientation: 1.0,
        }
    }
}

/// Parameters only the external fusion stage reads. Carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    pub sigma_fraction_activation: f64,
    pub sigma_fraction_normalization: f64,
    pub tolerance: f64,
    pub num_normalization_iters: usize,
    pub blur_fraction: f64,
    pub saliency_map_max_size: usize,
    pub center_bias: bool,
    pub normalize_top_channel_maps: bool,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            sigma_fraction_activation: 0.15,
            sigma_fraction_normalization: 0.06,
            tolerance: 1e-4,
            num_normalization_iters: 1,
            blur_fraction: 0.02,
            saliency_map_max_size: 32,
            center_bias: false,
            normalize_top_channel_maps: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Pyramid depth including the full-resolution level 0.
    pub pyramid_levels: usize,
    /// Orientation angles in degrees.
    pub gabor_angles: Vec<f64>,
    pub gabor: GaborParams,
    pub channels: FeatureChannels,
    pub channel_weights: ChannelWeights,
    pub canonical_size: CanonicalSize,
    pub fusion: FusionParams,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            pyramid_levels: 4,
            gabor_angles: vec![0.0, 45.0, 90.0, 135.0],
            gabor: GaborParams::default(),
            channels: FeatureChannels::ALL,
            channel_weights: ChannelWeights::default(),
            canonical_size: CANONICAL_SIZE,
            fusion: FusionParams::default(),
        }
    }
}

impl FeatureConfig {
    /// Checks everything except the Gabor parameters, which are checked
    /// when the filter bank is synthesized.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !(2..=MAX_PYRAMID_LEVELS).contains(&self.pyramid_levels) {
            return Err(FeatureError::Configuration(format!(
                "pyramid_levels must be in 2..={MAX_PYRAMID_LEVELS}, got {}",
                self.pyramid_levels
            )));
        }

        if self.channels.is_empty() {
            return Err(FeatureError::Configuration(
                "at least one feature channel must be selected".into(),
            ));
        }

        if self.channels.orientation {
            if self.gabor_angles.is_empty() {
                return Err(FeatureError::Configuration(
                    "gabor_angles must not be empty when orientation is enabled".into(),
                ));
            }
            if let Some(bad) = self.gabor_angles.iter().find(|a| !a.is_finite()) {
                return Err(FeatureError::Configuration(format!(
                    "gabor angle must be finite, got {bad}"
                )));
            }
        }

        if self.canonical_size.width == 0 || self.canonical_size.height == 0 {
            return Err(FeatureError::Configuration(format!(
                "canonical_size must be positive, got {}x{}",
                self.canonical_size.width, self.canonical_size.height
            )));
        }

        let w = &self.channel_weights;
        for (name, value) in [
            ("color", w.color),
            ("intensity", w.intensity),
            ("orientation", w.orientation),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FeatureError::Configuration(format!(
                    "channel weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Smallest image side that supports `pyramid_levels`: `2^pyramid_levels`.
    pub fn min_image_side(&self) -> usize {
        min_side_for_levels(self.pyramid_levels)
    }
}
