pub mod annotate;
pub mod contours;
pub mod preprocessing;

use image::{DynamicImage, GrayImage};

use crate::models::{Contour, ExtractionResult};
use crate::profile::{ExtractionProfile, Segmentation};

/// Run the feature-extraction pipeline over one image with the given
/// profile.
///
/// Stage order is fixed: color transform, noise suppression, segmentation,
/// optional morphological clean-up, contour tracing, filtering, annotation,
/// aggregation. Every stage works on its own buffer; the caller's image is
/// never mutated. The same image and profile always produce the same result.
pub fn extract(image: &DynamicImage, profile: &ExtractionProfile) -> ExtractionResult {
    let mask = segmentation_mask(image, profile);

    let traced = contours::external_contours(&mask);
    let kept: Vec<&Contour> = traced.iter().filter(|c| profile.keeps(c)).collect();

    let base = image.to_rgb8();
    let annotated = annotate::draw_outlines(&base, &kept, profile.annotation_color);
    let boxes = kept.iter().map(|c| c.bounding_box()).collect::<Vec<_>>();

    ExtractionResult {
        annotated,
        count: boxes.len(),
        boxes,
    }
}

/// Build the binary segmentation mask for an image under a profile: the
/// color transform, noise suppression, segmentation and clean-up stages.
///
/// Threshold-based profiles blur the grayscale image before thresholding.
/// Range-based profiles blur the mask instead and re-binarize it, so the
/// later morphology and tracing stages still see a two-valued image.
pub fn segmentation_mask(image: &DynamicImage, profile: &ExtractionProfile) -> GrayImage {
    let mask = match &profile.segmentation {
        Segmentation::FixedThreshold { threshold, inverted } => {
            let mut gray = preprocessing::to_grayscale(image);
            if let Some(sigma) = profile.blur_sigma {
                gray = preprocessing::blur(&gray, sigma);
            }
            preprocessing::binarize(&gray, *threshold, *inverted)
        }
        Segmentation::AdaptiveThreshold {
            block_radius,
            offset,
            inverted,
        } => {
            let mut gray = preprocessing::to_grayscale(image);
            if let Some(sigma) = profile.blur_sigma {
                gray = preprocessing::blur(&gray, sigma);
            }
            preprocessing::binarize_adaptive(&gray, *block_radius, *offset, *inverted)
        }
        Segmentation::HsvRange { lower, upper } => {
            let hsv = preprocessing::to_hsv(&image.to_rgb8());
            let mut mask = preprocessing::in_range(&hsv, *lower, *upper);
            if let Some(sigma) = profile.blur_sigma {
                mask = preprocessing::binarize(&preprocessing::blur(&mask, sigma), 127, false);
            }
            mask
        }
    };

    match profile.close_radius {
        Some(radius) => preprocessing::close_mask(&mask, radius),
        None => mask,
    }
}
