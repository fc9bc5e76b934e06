use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::models::Contour;

/// Draw each contour's closed outline onto a copy of `base`.
/// The input image is never touched.
pub fn draw_outlines(base: &RgbImage, contours: &[&Contour], color: Rgb<u8>) -> RgbImage {
    let mut canvas = base.clone();
    for contour in contours {
        let pts = &contour.points;
        match pts.len() {
            0 => {}
            1 => {
                let p = pts[0];
                if p.x >= 0 && p.y >= 0 {
                    canvas.put_pixel(p.x as u32, p.y as u32, color);
                }
            }
            _ => {
                for i in 0..pts.len() {
                    let a = pts[i];
                    let b = pts[(i + 1) % pts.len()];
                    draw_line_segment_mut(
                        &mut canvas,
                        (a.x as f32, a.y as f32),
                        (b.x as f32, b.y as f32),
                        color,
                    );
                }
            }
        }
    }
    canvas
}
