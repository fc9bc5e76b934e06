use image::{DynamicImage, GrayImage, Luma, RgbImage, imageops};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::map::map_colors2;
use imageproc::morphology::erode;
use imageproc::rect::Rect;

use crate::extraction::contours::external_contours;
use crate::models::Contour;

/// Black border added around the panorama so the filled region never
/// touches the canvas edge and contour tracing can close its boundary.
const PAD: u32 = 10;

/// Crop a stitched panorama to the largest axis-aligned rectangle that is
/// fully covered by filled (non-black) pixels.
///
/// The filled region left by a stitcher is rarely rectangular. Starting
/// from the bounding rectangle of the largest filled region, the rectangle
/// is eroded until subtracting the filled mask from it leaves nothing, at
/// which point it sits entirely inside the region. Each erosion strictly
/// shrinks the rectangle, so the loop terminates at an empty mask in the
/// worst case. If no filled region is found, the padded panorama is
/// returned unchanged.
pub fn autocrop(panorama: &DynamicImage) -> DynamicImage {
    let rgb = panorama.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut canvas = RgbImage::new(w + 2 * PAD, h + 2 * PAD);
    imageops::overlay(&mut canvas, &rgb, PAD as i64, PAD as i64);
    let padded = DynamicImage::ImageRgb8(canvas);

    // Filled-vs-empty mask: any nonzero intensity counts as filled.
    let filled = threshold(&padded.to_luma8(), 0, ThresholdType::Binary);

    let outer = external_contours(&filled);
    let Some(largest) = largest_by_area(&outer) else {
        return padded;
    };

    // Solid rectangle over the region of interest.
    let bb = largest.bounding_box();
    let mut rect_mask = GrayImage::new(filled.width(), filled.height());
    draw_filled_rect_mut(
        &mut rect_mask,
        Rect::at(bb.x as i32, bb.y as i32).of_size(bb.width, bb.height),
        Luma([255u8]),
    );

    // Shrink until the rectangle no longer covers any empty pixel.
    loop {
        rect_mask = erode(&rect_mask, Norm::LInf, 1);
        if count_nonzero(&subtract(&rect_mask, &filled)) == 0 {
            break;
        }
    }

    let refined = external_contours(&rect_mask);
    let Some(largest) = largest_by_area(&refined) else {
        return padded;
    };
    let bb = largest.bounding_box();
    padded.crop_imm(bb.x, bb.y, bb.width, bb.height)
}

fn largest_by_area(contours: &[Contour]) -> Option<&Contour> {
    contours.iter().max_by(|a, b| a.area().total_cmp(&b.area()))
}

/// Pixel-wise saturating subtraction `a - b`.
fn subtract(a: &GrayImage, b: &GrayImage) -> GrayImage {
    map_colors2(a, b, |p, q| Luma([p.0[0].saturating_sub(q.0[0])]))
}

fn count_nonzero(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rect_mask(width: u32, height: u32, rect: Rect) -> GrayImage {
        let mut mask = GrayImage::new(width, height);
        draw_filled_rect_mut(&mut mask, rect, Luma([255u8]));
        mask
    }

    #[test]
    fn erosion_strictly_shrinks_the_rectangle_mask() {
        let mut mask = solid_rect_mask(60, 60, Rect::at(10, 10).of_size(40, 30));

        // Every refinement step must lose pixels, down to an empty mask.
        let mut previous = count_nonzero(&mask);
        while previous > 0 {
            mask = erode(&mask, Norm::LInf, 1);
            let current = count_nonzero(&mask);
            assert!(
                current < previous,
                "erosion left the mask at {current} pixels, was {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn refinement_stops_once_the_rectangle_fits_the_filled_region() {
        // Filled region: a wide bar; starting rectangle: its bounding box
        // plus an empty margin on the right that must be eroded away.
        let filled = solid_rect_mask(80, 40, Rect::at(5, 5).of_size(40, 20));
        let mut rect_mask = solid_rect_mask(80, 40, Rect::at(5, 5).of_size(60, 20));

        let mut iterations = 0;
        loop {
            rect_mask = erode(&rect_mask, Norm::LInf, 1);
            iterations += 1;
            if count_nonzero(&subtract(&rect_mask, &filled)) == 0 {
                break;
            }
            assert!(iterations < 80, "refinement failed to terminate");
        }

        assert!(count_nonzero(&rect_mask) > 0);
        // 20 pixels of overhang on the right take 20 erosions to clear.
        assert_eq!(iterations, 20);
    }
}
