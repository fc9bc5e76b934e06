use image::{DynamicImage, GrayImage, RgbImage, imageops, imageops::FilterType};
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template};

use super::Stitcher;
use crate::error::StitchError;

/// Translation-only stitcher built on normalized template matching.
///
/// Each image's offset against its predecessor is estimated by matching the
/// successor's central patch inside the predecessor, on grayscale thumbnails
/// for speed. The images are then composited onto one canvas, leaving black
/// wherever nothing maps; the compositor's auto-crop removes that fringe.
///
/// This deliberately skips rotation, scale and perspective. It is the
/// default backend and can be replaced through the [`Stitcher`] trait.
pub struct TranslationStitcher {
    /// Matches scoring below this are rejected as insufficient overlap.
    pub min_match_score: f32,
    /// Images are downscaled so their longest side is at most this.
    pub max_working_dim: u32,
}

impl Default for TranslationStitcher {
    fn default() -> Self {
        Self {
            min_match_score: 0.6,
            max_working_dim: 320,
        }
    }
}

impl Stitcher for TranslationStitcher {
    fn stitch(&self, images: &[DynamicImage]) -> Result<DynamicImage, StitchError> {
        if images.len() < 2 {
            return Err(StitchError::Other(
                "at least two images required".to_string(),
            ));
        }

        let longest = images
            .iter()
            .map(|img| img.width().max(img.height()))
            .max()
            .unwrap_or(1);
        let factor = longest.div_ceil(self.max_working_dim).max(1);
        let thumbs: Vec<GrayImage> = images.iter().map(|img| downscale(img, factor)).collect();

        // Offsets of every image relative to the first, at full resolution.
        let mut offsets: Vec<(i64, i64)> = vec![(0, 0)];
        for pair in thumbs.windows(2) {
            let (dx, dy) = self.pairwise_offset(&pair[0], &pair[1])?;
            let (px, py) = offsets[offsets.len() - 1];
            offsets.push((px + dx * factor as i64, py + dy * factor as i64));
        }

        Ok(composite(images, &offsets))
    }
}

impl TranslationStitcher {
    /// Estimate the offset of `next` relative to `base` by locating the
    /// central patch of `next` inside `base`.
    fn pairwise_offset(&self, base: &GrayImage, next: &GrayImage) -> Result<(i64, i64), StitchError> {
        let (nw, nh) = next.dimensions();
        let tx = nw / 4;
        let ty = nh / 4;
        let tw = (nw / 2).max(1);
        let th = (nh / 2).max(1);
        if tw > base.width() || th > base.height() {
            return Err(StitchError::InsufficientOverlap);
        }

        let template = imageops::crop_imm(next, tx, ty, tw, th).to_image();
        let scores = match_template(base, &template, MatchTemplateMethod::CrossCorrelationNormalized);
        let extremes = find_extremes(&scores);

        // NaN scores (flat patches) fail this check too.
        if !(extremes.max_value >= self.min_match_score) {
            return Err(StitchError::InsufficientOverlap);
        }
        let (mx, my) = extremes.max_value_location;
        Ok((mx as i64 - tx as i64, my as i64 - ty as i64))
    }
}

fn downscale(image: &DynamicImage, factor: u32) -> GrayImage {
    let gray = image.to_luma8();
    if factor <= 1 {
        return gray;
    }
    let w = (gray.width() / factor).max(1);
    let h = (gray.height() / factor).max(1);
    imageops::resize(&gray, w, h, FilterType::Triangle)
}

/// Paint every image onto a canvas large enough for all offsets. Pixels no
/// image maps to stay black.
fn composite(images: &[DynamicImage], offsets: &[(i64, i64)]) -> DynamicImage {
    let min_x = offsets.iter().map(|o| o.0).min().unwrap_or(0);
    let min_y = offsets.iter().map(|o| o.1).min().unwrap_or(0);
    let max_x = images
        .iter()
        .zip(offsets)
        .map(|(img, o)| o.0 + img.width() as i64)
        .max()
        .unwrap_or(0);
    let max_y = images
        .iter()
        .zip(offsets)
        .map(|(img, o)| o.1 + img.height() as i64)
        .max()
        .unwrap_or(0);

    let mut canvas = RgbImage::new((max_x - min_x) as u32, (max_y - min_y) as u32);
    for (img, (ox, oy)) in images.iter().zip(offsets) {
        imageops::overlay(&mut canvas, &img.to_rgb8(), ox - min_x, oy - min_y);
    }
    DynamicImage::ImageRgb8(canvas)
}
