use sf_filter::GaborError;
use thiserror::Error;

/// Failures of one feature-extraction call.
///
/// All variants are raised before any maps are produced; numeric edge cases
/// inside a stage (such as zero intensity in the opponency ratio) are not
/// errors.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid input image: {0}")]
    Input(String),

    #[error(
        "image {width}x{height} cannot hold {requested} pyramid levels \
         (smaller side must be at least {min_side}, supports {supported})"
    )]
    Resolution {
        width: usize,
        height: usize,
        requested: usize,
        supported: usize,
        min_side: usize,
    },

    #[error("invalid gabor filter configuration: {0}")]
    FilterConfig(#[from] GaborError),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("image buffer error: {0}")]
    Image(#[from] sf_core::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
