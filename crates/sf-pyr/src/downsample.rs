use sf_core::{BorderMode, Image, ImageView};
use sf_filter::{Kernel1D, convolve_separable_f32};

#[inline]
fn dst_dims(src_w: usize, src_h: usize) -> (usize, usize) {
    (src_w / 2, src_h / 2)
}

/// One pyramid reduce step: binomial blur, then keep even rows and columns.
pub fn pyr_down_f32(src: &ImageView<'_, f32>) -> Image<f32> {
    let (dst_w, dst_h) = dst_dims(src.width(), src.height());
    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    pyr_down_f32_into(src, &Kernel1D::pyr_down(), &mut dst);
    dst
}

/// Keeps pixels `(2x, 2y)`; no filtering.
pub fn decimate2x_f32(src: &ImageView<'_, f32>) -> Image<f32> {
    let (dst_w, dst_h) = dst_dims(src.width(), src.height());
    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    decimate_into(src, &mut dst);
    dst
}

pub(crate) fn pyr_down_f32_into(src: &ImageView<'_, f32>, kernel: &Kernel1D, dst: &mut Image<f32>) {
    let (dst_w, dst_h) = dst_dims(src.width(), src.height());
    debug_assert_eq!(dst.width(), dst_w);
    debug_assert_eq!(dst.height(), dst_h);

    if dst_w == 0 || dst_h == 0 {
        return;
    }

    let blurred = convolve_separable_f32(src, kernel, BorderMode::Reflect101);
    decimate_into(&blurred.as_view(), dst);
}

fn decimate_into(src: &ImageView<'_, f32>, dst: &mut Image<f32>) {
    for y in 0..dst.height() {
        let src_row = src.row(2 * y);
        for (x, out) in dst.row_mut(y).iter_mut().enumerate() {
            *out = src_row[2 * x];
        }
    }
}
