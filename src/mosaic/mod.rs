pub mod autocrop;
pub mod stitcher;

use image::DynamicImage;

use crate::error::{Error, StitchError};
use crate::models::MosaicResult;

pub use stitcher::TranslationStitcher;

/// Reported when the stitching backend cannot align the inputs.
pub const STITCH_FAILED: &str = "stitch_failed";

/// Opaque panorama-stitching capability.
///
/// Feature matching, homography estimation and blending all live behind
/// this seam, so any backend can be swapped in without touching the crop
/// logic in [`MosaicCompositor`].
pub trait Stitcher: Send + Sync {
    fn stitch(&self, images: &[DynamicImage]) -> Result<DynamicImage, StitchError>;
}

/// Merges overlapping captures into one panorama and crops away the black
/// fringe the stitcher leaves at irregular borders.
pub struct MosaicCompositor {
    stitcher: Box<dyn Stitcher>,
}

impl MosaicCompositor {
    pub fn new(stitcher: Box<dyn Stitcher>) -> Self {
        Self { stitcher }
    }

    /// Compose `images` into a single auto-cropped panorama.
    ///
    /// Fewer than two images is a caller error. A stitcher failure is a
    /// valid outcome, reported through [`MosaicResult`] rather than an
    /// `Err`, so the caller decides how to surface it.
    pub fn compose(&self, images: &[DynamicImage]) -> Result<MosaicResult, Error> {
        if images.len() < 2 {
            return Err(Error::InsufficientInput {
                required: 2,
                got: images.len(),
            });
        }

        let stitched = match self.stitcher.stitch(images) {
            Ok(panorama) => panorama,
            Err(_) => return Ok(MosaicResult::failed(STITCH_FAILED)),
        };

        Ok(MosaicResult::success(autocrop::autocrop(&stitched)))
    }
}

impl Default for MosaicCompositor {
    fn default() -> Self {
        Self::new(Box::new(TranslationStitcher::default()))
    }
}
