//! Umbrella crate for the `saliency-features` workspace.
//!
//! Re-exports the image containers, filters, pyramid tools and the feature
//! extractor so applications can depend on a single crate.

pub use sf_core::*;
pub use sf_features::*;
pub use sf_filter::*;
pub use sf_pyr::*;
