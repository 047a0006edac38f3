use sf_core::{BorderMode, Image, ImageView, sample_bicubic_f32};

/// Resizes to exactly `dst_w x dst_h` with cubic convolution.
///
/// Pixel centers are aligned: destination `x` samples source
/// `(x + 0.5) * src_w / dst_w - 0.5`. Borders are replicated. The result may
/// overshoot the input range near sharp transitions.
pub fn resize_cubic_f32(src: &ImageView<'_, f32>, dst_w: usize, dst_h: usize) -> Image<f32> {
    if src.width() == 0 || src.height() == 0 {
        return Image::new_fill(dst_w, dst_h, 0.0f32);
    }

    let scale_x = src.width() as f32 / dst_w.max(1) as f32;
    let scale_y = src.height() as f32 / dst_h.max(1) as f32;

    Image::from_fn(dst_w, dst_h, |x, y| {
        let sx = (x as f32 + 0.5) * scale_x - 0.5;
        let sy = (y as f32 + 0.5) * scale_y - 0.5;
        sample_bicubic_f32(src, sx, sy, BorderMode::Clamp)
    })
}
