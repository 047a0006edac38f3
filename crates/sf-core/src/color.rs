use crate::image::{Image, ImageView};

/// Planar split of an RGB image plus its intensity plane.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbPlanes {
    pub red: Image<f32>,
    pub green: Image<f32>,
    pub blue: Image<f32>,
    /// Per-pixel `max(r, g, b)`.
    pub intensity: Image<f32>,
}

/// Splits an interleaved RGB view into planar channels.
///
/// The intensity plane is the maximum over all three channels, so it is
/// never below any of them at any pixel.
pub fn split_rgb(src: &ImageView<'_, [f32; 3]>) -> RgbPlanes {
    let (w, h) = (src.width(), src.height());
    let n = w * h;
    let mut red = Vec::with_capacity(n);
    let mut green = Vec::with_capacity(n);
    let mut blue = Vec::with_capacity(n);
    let mut intensity = Vec::with_capacity(n);

    for y in 0..h {
        for &[r, g, b] in src.row(y) {
            red.push(r);
            green.push(g);
            blue.push(b);
            intensity.push(r.max(g).max(b));
        }
    }

    let plane = |data| Image::from_vec(w, h, data).expect("plane length matches view area");
    RgbPlanes {
        red: plane(red),
        green: plane(green),
        blue: plane(blue),
        intensity: plane(intensity),
    }
}
