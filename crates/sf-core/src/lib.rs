//! Foundational primitives for saliency feature extraction.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded decoder buffers and subviews.
//!
//! ## Color Images
//! Color images are interleaved `[f32; 3]` pixels in RGB order with every
//! sample normalized to `[0, 1]`. [`split_rgb`] turns one into three planar
//! channels plus the max-of-three intensity plane.
//!
//! ## Border Modes
//! Out-of-range indices are resolved by [`BorderMode`]. Reflect-101 mirrors
//! around edge pixels without repeating edge elements.
//!
//! ## Sampling Coordinates
//! Sampling uses pixel-center coordinates where integer coordinates refer to
//! pixel centers. Bicubic sampling uses the 4x4 neighborhood around
//! `floor(x)` with the Keys kernel (`a = -0.75`).

mod border;
mod color;
mod error;
mod image;
mod sample;

pub use border::{BorderMode, map_index};
pub use color::{RgbPlanes, split_rgb};
pub use error::Error;
pub use image::{Image, ImageView};
pub use sample::{CUBIC_A, cubic_weights, sample_bicubic_f32};
