use sf_core::{Image, ImageView};
use sf_pyr::resize_cubic_f32;

use crate::config::CanonicalSize;

/// Maps feature maps of any size onto one fixed grid for cross-scale
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalResampler {
    size: CanonicalSize,
}

impl CanonicalResampler {
    pub fn new(size: CanonicalSize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> CanonicalSize {
        self.size
    }

    /// Bicubic resample to exactly `size`. Values are not clamped, so cubic
    /// overshoot near edges is kept.
    pub fn resample(&self, map: &ImageView<'_, f32>) -> Image<f32> {
        resize_cubic_f32(map, self.size.width, self.size.height)
    }
}

impl Default for CanonicalResampler {
    fn default() -> Self {
        Self::new(CanonicalSize::default())
    }
}
