use sf_core::{BorderMode, Image, ImageView};
use sf_filter::{GaborKernel, correlate2d_f32};

/// Quadrature energy `sqrt(even^2 + odd^2)` of one level.
///
/// Both kernels are correlated with `src` using reflect-101 borders, so the
/// output has the dimensions of `src`. Values are non-negative.
pub fn orientation_energy(
    src: &ImageView<'_, f32>,
    even: &GaborKernel,
    odd: &GaborKernel,
) -> Image<f32> {
    debug_assert_eq!(even.angle_deg, odd.angle_deg);

    let re = correlate2d_f32(src, &even.taps, BorderMode::Reflect101);
    let im = correlate2d_f32(src, &odd.taps, BorderMode::Reflect101);

    let data = re
        .data()
        .iter()
        .zip(im.data())
        .map(|(&e, &o)| e.hypot(o))
        .collect();
    Image::from_vec(src.width(), src.height(), data).expect("correlation preserves dimensions")
}
