//! Gaussian image pyramids and resampling for multi-scale feature maps.
//!
//! `sf-pyr` builds each level with the classic pyramid reduce step: a 5-tap
//! binomial low-pass (`[1, 4, 6, 4, 1] / 16`, reflect-101 borders) followed by
//! 2x decimation.
//!
//! Floor policy:
//! - Output size is `(src.width() / 2, src.height() / 2)`.
//! - Destination pixel `(x, y)` is the blurred source pixel `(2x, 2y)`; if the
//!   source width or height is odd, the last column/row only contributes
//!   through the blur.
//!
//! [`resize_cubic_f32`] maps any level onto a fixed grid with pixel-center
//! aligned cubic convolution so maps from different levels can be compared
//! sample by sample.

mod downsample;
mod pyramid;
mod resize;

pub use downsample::{decimate2x_f32, pyr_down_f32};
pub use pyramid::{GaussianPyramid, supported_levels};
pub use resize::resize_cubic_f32;
