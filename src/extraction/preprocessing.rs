use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::map_colors;
use imageproc::morphology::close;

/// Convert image to grayscale
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Apply Gaussian blur to reduce noise
pub fn blur(image: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(image, sigma)
}

/// Binarize with a fixed threshold; `inverted` keeps the dark side.
pub fn binarize(image: &GrayImage, thresh: u8, inverted: bool) -> GrayImage {
    let kind = if inverted {
        ThresholdType::BinaryInverted
    } else {
        ThresholdType::Binary
    };
    threshold(image, thresh, kind)
}

/// Binarize against the mean of a `(2 * block_radius + 1)` square window
/// minus `offset`, with the window clamped at the image border.
///
/// The offset keeps uniform regions on the bright side of the comparison,
/// so only pixels noticeably darker than their surroundings segment out.
pub fn binarize_adaptive(image: &GrayImage, block_radius: u32, offset: i16, inverted: bool) -> GrayImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    // Integral image with a zero row and column in front.
    let stride = (w + 1) as usize;
    let mut integral = vec![0u64; stride * (h + 1) as usize];
    for y in 0..h {
        for x in 0..w {
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            integral[idx] = image.get_pixel(x, y).0[0] as u64 + integral[idx - 1]
                + integral[idx - stride]
                - integral[idx - stride - 1];
        }
    }
    let sum_at = |x: u32, y: u32| integral[y as usize * stride + x as usize];

    GrayImage::from_fn(w, h, |x, y| {
        let x0 = x.saturating_sub(block_radius);
        let y0 = y.saturating_sub(block_radius);
        let x1 = (x + block_radius + 1).min(w);
        let y1 = (y + block_radius + 1).min(h);
        let count = ((x1 - x0) * (y1 - y0)) as i64;
        let sum = (sum_at(x1, y1) + sum_at(x0, y0) - sum_at(x1, y0) - sum_at(x0, y1)) as i64;
        let mean = sum / count;

        let above = image.get_pixel(x, y).0[0] as i64 > mean - offset as i64;
        let keep = if inverted { !above } else { above };
        Luma([if keep { 255 } else { 0 }])
    })
}

/// Convert an RGB image to HSV with hue scaled to 0..=179 so a full byte
/// range covers saturation and value.
pub fn to_hsv(image: &RgbImage) -> RgbImage {
    map_colors(image, rgb_to_hsv)
}

fn rgb_to_hsv(Rgb([r, g, b]): Rgb<u8>) -> Rgb<u8> {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }
    let s = if max == 0.0 { 0.0 } else { delta / max };

    Rgb([
        (h / 2.0).round().min(179.0) as u8,
        (s * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    ])
}

/// Mask of pixels whose channels all lie inside `[lower, upper]`.
pub fn in_range(hsv: &RgbImage, lower: [u8; 3], upper: [u8; 3]) -> GrayImage {
    map_colors(hsv, |p| {
        let inside = (0..3).all(|i| p.0[i] >= lower[i] && p.0[i] <= upper[i]);
        Luma([if inside { 255u8 } else { 0 }])
    })
}

/// Morphological closing (dilate then erode) with a square structuring
/// element, merging broken fragments of the same feature.
pub fn close_mask(mask: &GrayImage, radius: u8) -> GrayImage {
    close(mask, Norm::LInf, radius)
}
