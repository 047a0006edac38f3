use sf_core::Image;

use crate::maps::FeatureMaps;

/// Downstream stage that turns the extracted feature maps into one saliency
/// map (activation, normalization and channel combination).
///
/// No implementation lives in this crate. Implementors read the maps, the
/// per-channel weights ([`FeatureMaps::weight`]) and the pass-through
/// parameters ([`FeatureMaps::fusion_params`]); they must not need anything
/// else from the extraction.
pub trait SaliencyFusion {
    type Error;

    fn fuse(&self, maps: &FeatureMaps) -> Result<Image<f32>, Self::Error>;
}
