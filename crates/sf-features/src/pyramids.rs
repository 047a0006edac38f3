use sf_core::{Image, ImageView, split_rgb};
use sf_pyr::{GaussianPyramid, supported_levels};

use crate::error::{FeatureError, Result};

/// Gaussian pyramids of the four base channels, all with the same depth and
/// the same per-level dimensions.
#[derive(Debug, Clone)]
pub struct ChannelPyramids {
    pub red: Vec<Image<f32>>,
    pub green: Vec<Image<f32>>,
    pub blue: Vec<Image<f32>>,
    pub intensity: Vec<Image<f32>>,
}

impl ChannelPyramids {
    pub fn num_levels(&self) -> usize {
        self.intensity.len()
    }

    /// Dimensions of every level, level 0 first.
    pub fn level_dims(&self) -> Vec<(usize, usize)> {
        self.intensity.iter().map(Image::dims).collect()
    }
}

/// Rejects images with no pixels or with a non-finite sample.
pub fn check_input(image: &ImageView<'_, [f32; 3]>) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FeatureError::Input(format!(
            "image has zero area ({}x{})",
            image.width(),
            image.height()
        )));
    }

    for y in 0..image.height() {
        if let Some(x) = image
            .row(y)
            .iter()
            .position(|px| px.iter().any(|v| !v.is_finite()))
        {
            return Err(FeatureError::Input(format!(
                "non-finite sample at ({x}, {y})"
            )));
        }
    }
    Ok(())
}

/// Smallest image side that can hold `levels` pyramid levels: `2^levels`,
/// saturating at `usize::MAX`.
pub fn min_side_for_levels(levels: usize) -> usize {
    u32::try_from(levels)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .unwrap_or(usize::MAX)
}

/// Fails with [`FeatureError::Resolution`] unless the smaller side of a
/// `width x height` image is at least `2^levels`.
///
/// `supported` in the error is the largest level count the image allows,
/// `floor(log2(min(width, height)))`.
pub fn check_resolution(width: usize, height: usize, levels: usize) -> Result<()> {
    let supported = supported_levels(width, height).saturating_sub(1);
    if levels > supported {
        return Err(FeatureError::Resolution {
            width,
            height,
            requested: levels,
            supported,
            min_side: min_side_for_levels(levels),
        });
    }
    Ok(())
}

/// Splits `image` into R, G, B and intensity planes and builds a
/// `levels`-deep pyramid for each.
///
/// The four pyramids are independent and built concurrently; the output is
/// identical to a sequential build.
pub fn build_channel_pyramids(
    image: &ImageView<'_, [f32; 3]>,
    levels: usize,
) -> Result<ChannelPyramids> {
    check_input(image)?;
    check_resolution(image.width(), image.height(), levels)?;

    let planes = split_rgb(image);
    let build = |plane: &Image<f32>| GaussianPyramid::from_f32(&plane.as_view(), levels).into_levels();

    let ((red, green), (blue, intensity)) = rayon::join(
        || rayon::join(|| build(&planes.red), || build(&planes.green)),
        || rayon::join(|| build(&planes.blue), || build(&planes.intensity)),
    );

    debug_assert_eq!(intensity.len(), levels);
    Ok(ChannelPyramids {
        red,
        green,
        blue,
        intensity,
    })
}
