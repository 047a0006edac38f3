//! Filtering primitives for multi-scale feature extraction.
//!
//! Coordinates follow pixel-center convention: sample `signal[i]` is located at
//! position `x = i`.
//!
//! - [`conv1d`] runs symmetric 1D kernels along rows and columns; the pyramid
//!   low-pass is built from it.
//! - [`conv2d`] correlates an image with a dense square kernel. It is used for
//!   Gabor filtering, where kernels are not separable.
//! - [`gabor`] synthesizes zero-mean, unit-energy Gabor quadrature pairs and
//!   groups them into an immutable [`FilterBank`].
//!
//! Kernels are applied as correlation (no flip). All kernels used for
//! blurring are symmetric, and flipping an odd-phase Gabor kernel only flips
//! the sign of its response, which the quadrature energy discards.

pub mod conv1d;
pub mod conv2d;
pub mod gabor;
pub mod kernels1d;

pub use conv1d::{convolve_f32, convolve_separable_f32};
pub use conv2d::correlate2d_f32;
pub use gabor::{
    FilterBank, GaborError, GaborKernel, GaborParams, MAX_RADIUS, Phase, gabor_kernel,
};
pub use kernels1d::Kernel1D;
