use image::{DynamicImage, Rgb, RgbImage};

/// Color constants for tests
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Creates a solid single-color image.
pub fn solid_image(width: u32, height: u32, color: Rgb<u8>) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, color))
}

/// Creates a black image with one filled rectangle `(x, y, w, h)` of `color`.
pub fn image_with_rect(
    width: u32,
    height: u32,
    rect: (u32, u32, u32, u32),
    color: Rgb<u8>,
) -> DynamicImage {
    image_with_rects(width, height, &[rect], color)
}

/// Creates a black image with several filled rectangles of `color`.
pub fn image_with_rects(
    width: u32,
    height: u32,
    rects: &[(u32, u32, u32, u32)],
    color: Rgb<u8>,
) -> DynamicImage {
    image_on(width, height, rects, color, BLACK)
}

/// Creates a `background`-colored image with several filled rectangles of
/// `color`.
pub fn image_on(
    width: u32,
    height: u32,
    rects: &[(u32, u32, u32, u32)],
    color: Rgb<u8>,
    background: Rgb<u8>,
) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
        if inside { color } else { background }
    }))
}

/// Creates an irregular (L-shaped) filled region on a black canvas, shaped
/// like the output a panorama stitcher leaves behind.
pub fn l_shaped_panorama() -> DynamicImage {
    image_with_rects(200, 120, &[(20, 10, 160, 60), (20, 10, 80, 100)], WHITE)
}

/// Creates a diagonal gradient so template matching has texture to lock onto.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    }))
}
