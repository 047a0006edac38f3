//! Bottom-up visual saliency feature extraction.
//!
//! Pipeline for one RGB image:
//! - Build Gaussian pyramids of R, G, B and intensity (`max(R, G, B)`).
//! - At every level except 0, compute intensity, red-green and blue-yellow
//!   opponency maps and one Gabor orientation-energy map per angle.
//! - Resample every map onto a fixed canonical grid.
//!
//! The result ([`FeatureMaps`]) is the input of a separate fusion stage,
//! described by the [`SaliencyFusion`] trait and not implemented here.
//!
//! ```no_run
//! use sf_core::Image;
//! use sf_features::{Channel, FeatureConfig, FeatureExtractor};
//!
//! let img = Image::new_fill(128, 96, [0.2f32, 0.4, 0.6]);
//! let extractor = FeatureExtractor::new(FeatureConfig::default())?;
//! let maps = extractor.extract(&img.as_view())?;
//! let rg = maps.get(Channel::RedGreen).expect("color enabled by default");
//! assert_eq!(rg.canonical()[0].map.dims(), (32, 28));
//! # Ok::<(), sf_features::FeatureError>(())
//! ```

mod canonical;
mod config;
mod error;
mod extractor;
mod fusion;
mod maps;
mod opponency;
mod orientation;
mod pyramids;

pub use canonical::CanonicalResampler;
pub use config::{
    CANONICAL_SIZE, CanonicalSize, ChannelWeights, FeatureChannels, FeatureConfig, FusionParams,
    MAX_PYRAMID_LEVELS,
};
pub use error::{FeatureError, Result};
pub use extractor::{FeatureExtractor, extract_feature_maps};
pub use fusion::SaliencyFusion;
pub use maps::{Channel, ChannelMaps, FeatureMap, FeatureMaps, Resolution};
pub use opponency::{blue_yellow, red_green};
pub use orientation::orientation_energy;
pub use pyramids::{
    ChannelPyramids, build_channel_pyramids, check_input, check_resolution, min_side_for_levels,
};
