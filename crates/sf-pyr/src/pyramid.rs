use sf_core::{Image, ImageView};
use sf_filter::Kernel1D;

use crate::downsample::pyr_down_f32_into;

/// Reusable f32 Gaussian pyramid.
///
/// Level 0 is a copy of the input. Each next level is a pyramid reduce
/// (binomial blur + 2x decimation) of the previous level.
///
/// If a requested level would have a zero dimension, building stops early;
/// callers that need an exact depth check [`supported_levels`] first.
#[derive(Debug, Clone)]
pub struct GaussianPyramid {
    levels: Vec<Image<f32>>,
    kernel: Kernel1D,
}

impl Default for GaussianPyramid {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianPyramid {
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            kernel: Kernel1D::pyr_down(),
        }
    }

    /// Builds a fresh pyramid in one call.
    pub fn from_f32(src: &ImageView<'_, f32>, num_levels: usize) -> Self {
        let mut pyr = Self::new();
        pyr.build_from_f32(src, num_levels);
        pyr
    }

    /// Ensures that internal buffers match the size chain implied by
    /// `(base_w, base_h, num_levels)`.
    ///
    /// Level dimensions are computed with integer halving:
    /// `(w, h), (w/2, h/2), ...`.
    pub fn ensure(&mut self, base_w: usize, base_h: usize, num_levels: usize) {
        self.levels.truncate(num_levels);
        self.levels
            .resize_with(num_levels, || Image::new_fill(0, 0, 0.0f32));

        let mut w = base_w;
        let mut h = base_h;
        for level in &mut self.levels {
            if level.width() != w || level.height() != h {
                *level = Image::new_fill(w, h, 0.0f32);
            }
            w /= 2;
            h /= 2;
        }
    }

    pub fn build_from_f32(&mut self, src: &ImageView<'_, f32>, num_levels: usize) {
        let build_levels = num_levels.min(supported_levels(src.width(), src.height()));
        if build_levels == 0 {
            self.levels.clear();
            return;
        }

        self.ensure(src.width(), src.height(), build_levels);
        copy_f32(src, &mut self.levels[0]);

        for level_idx in 1..build_levels {
            let (prev_levels, curr_and_tail) = self.levels.split_at_mut(level_idx);
            let prev = &prev_levels[level_idx - 1];
            let curr = &mut curr_and_tail[0];
            pyr_down_f32_into(&prev.as_view(), &self.kernel, curr);
        }
    }

    pub fn level(&self, i: usize) -> Option<&Image<f32>> {
        self.levels.get(i)
    }

    pub fn levels(&self) -> &[Image<f32>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<Image<f32>> {
        self.levels
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }
}

/// Number of levels (including level 0) a `base_w x base_h` input can hold
/// before a dimension halves to zero.
///
/// This is `1 + floor(log2(min(base_w, base_h)))`, or 0 for an empty input.
pub fn supported_levels(base_w: usize, base_h: usize) -> usize {
    let min_side = base_w.min(base_h);
    if min_side == 0 {
        return 0;
    }
    (usize::BITS - min_side.leading_zeros()) as usize
}

fn copy_f32(src: &ImageView<'_, f32>, dst: &mut Image<f32>) {
    debug_assert_eq!(src.width(), dst.width());
    debug_assert_eq!(src.height(), dst.height());

    if let Some(src_contig) = src.as_contiguous_slice() {
        dst.data_mut().copy_from_slice(src_contig);
        return;
    }

    for y in 0..src.height() {
        dst.row_mut(y).copy_from_slice(src.row(y));
    }
}
