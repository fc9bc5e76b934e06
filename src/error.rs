use thiserror::Error as ThisError;

/// Failures surfaced by the compositor, pipeline and packager.
///
/// Every variant is request-scoped: nothing persists across a failed call, so
/// callers only need to surface the message.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Too few images were supplied for an operation that needs several.
    #[error("at least {required} images required, got {got}")]
    InsufficientInput { required: usize, got: usize },

    /// An input file was empty, unreadable or not a decodable image.
    #[error("invalid input: {0}")]
    Input(String),

    /// The stitching backend could not align the inputs.
    #[error("stitching failed: {0}")]
    Stitch(String),

    /// Unexpected failure inside a pipeline stage.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by a [`crate::mosaic::Stitcher`] implementation.
#[derive(Debug, ThisError)]
pub enum StitchError {
    /// The images do not share enough detail to estimate their alignment.
    #[error("not enough overlapping detail shared between the input images")]
    InsufficientOverlap,

    /// Any other backend-specific failure.
    #[error("{0}")]
    Other(String),
}
