use crate::border::{BorderMode, map_index};
use crate::image::ImageView;

/// Keys cubic convolution parameter, matching the common `INTER_CUBIC`
/// convention.
pub const CUBIC_A: f32 = -0.75;

/// Cubic convolution weights for the four taps at offsets `-1, 0, 1, 2`
/// around `floor(x)`, where `t = x - floor(x)` is in `[0, 1)`.
///
/// Weights always sum to 1.
#[inline]
pub fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let s = 1.0 - t;
    let w2 = ((a + 2.0) * s - (a + 3.0)) * s * s + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Samples with 4x4 cubic convolution.
///
/// Values may overshoot the range of the neighborhood; no clipping is applied.
pub fn sample_bicubic_f32<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    border: BorderMode<f32>,
) -> f32 {
    if img.width() == 0 || img.height() == 0 {
        if let BorderMode::Constant(v) = border {
            return v;
        }
        panic!("cannot sample an empty image with non-constant border");
    }

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let wx = cubic_weights(x - x0 as f32);
    let wy = cubic_weights(y - y0 as f32);

    let mut acc = 0.0f32;
    for (j, &wyj) in wy.iter().enumerate() {
        let sy = y0 - 1 + j as isize;
        let mut row_acc = 0.0f32;
        for (i, &wxi) in wx.iter().enumerate() {
            let sx = x0 - 1 + i as isize;
            row_acc += wxi * sample_at_f32(img, sx, sy, &border);
        }
        acc += wyj * row_acc;
    }
    acc
}

fn sample_at_f32<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: isize,
    y: isize,
    border: &BorderMode<f32>,
) -> f32 {
    match border {
        BorderMode::Constant(c) => {
            if x < 0 || y < 0 || x >= img.width() as isize || y >= img.height() as isize {
                *c
            } else {
                // SAFETY: Bounds are checked immediately above.
                unsafe { (*img.get_unchecked(x as usize, y as usize)).into() }
            }
        }
        BorderMode::Clamp | BorderMode::Reflect101 => {
            let xi = map_index(x, img.width(), border).expect("mapped x index should exist");
            let yi = map_index(y, img.height(), border).expect("mapped y index should exist");
            // SAFETY: `map_index` returns indices in `[0, len)` for non-empty images.
            unsafe { (*img.get_unchecked(xi, yi)).into() }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::border::BorderMode;
    use crate::image::Image;
    use crate::sample::{cubic_weights, sample_bicubic_f32};

    #[test]
    fn cubic_weights_partition_unity_and_interpolate() {
        for step in 0..10 {
            let t = step as f32 / 10.0;
            let w = cubic_weights(t);
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "t={t} sum={sum}");
        }

        let w = cubic_weights(0.0);
        assert!(w[0].abs() < 1e-6);
        assert!((w[1] - 1.0).abs() < 1e-6);
        assert!(w[2].abs() < 1e-6);
        assert!(w[3].abs() < 1e-6);
    }

    #[test]
    fn bicubic_hits_pixel_centers_and_reproduces_ramps() {
        let img = Image::from_fn(6, 5, |x, y| x as f32 * 2.0 + y as f32);
        let view = img.as_view();

        let at_center = sample_bicubic_f32(&view, 3.0, 2.0, BorderMode::Clamp);
        assert!((at_center - 8.0).abs() < 1e-5);

        // Midway between samples the symmetric taps reproduce a ramp exactly.
        let between = sample_bicubic_f32(&view, 2.5, 1.5, BorderMode::Clamp);
        assert!((between - 6.5).abs() < 1e-5);
    }

    #[test]
    fn bicubic_constant_image_stays_constant() {
        let img = Image::new_fill(4, 3, 0.5f32);
        let view = img.as_view();
        for &(x, y) in &[(-0.7, -0.2), (1.3, 0.9), (3.9, 2.6)] {
            let v = sample_bicubic_f32(&view, x, y, BorderMode::Clamp);
            assert!((v - 0.5).abs() < 1e-6);
        }
    }
}
