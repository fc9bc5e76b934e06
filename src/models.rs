use image::{DynamicImage, RgbImage};
use imageproc::point::Point;
use serde::Serialize;

use crate::error::Error;

/// Axis-aligned integer rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Closed boundary traced from a binary mask, in trace order.
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    /// Enclosed area of the boundary polygon.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Smallest axis-aligned rectangle containing every boundary point.
    pub fn bounding_box(&self) -> BoundingBox {
        if self.points.is_empty() {
            return BoundingBox {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        }
        let min_x = self.points.iter().map(|p| p.x).min().unwrap_or(0).max(0);
        let min_y = self.points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_x = self.points.iter().map(|p| p.x).max().unwrap_or(0).max(0);
        let max_y = self.points.iter().map(|p| p.y).max().unwrap_or(0).max(0);
        BoundingBox {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }

    /// Whether the boundary is convex.
    ///
    /// Compares the enclosed area against the area of the boundary's convex
    /// hull, with a small slack for the half-pixel staircase that tracing a
    /// raster boundary introduces. A genuinely concave shape loses a
    /// substantial fraction of its hull area and fails the check.
    pub fn is_convex(&self) -> bool {
        let area = self.area();
        let hull = convex_hull(&self.points);
        polygon_area(&hull) <= area * 1.02 + 2.0
    }
}

fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0i64;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    sum.abs() as f64 / 2.0
}

/// Convex hull by Andrew's monotone chain, counter-clockwise.
fn convex_hull(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut pts: Vec<Point<i32>> = points.to_vec();
    pts.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point<i32>> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point<i32>> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn cross(o: Point<i32>, a: Point<i32>, b: Point<i32>) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}

/// Output of one feature-extraction run.
///
/// `boxes` follows the trace order of the surviving contours and
/// `count == boxes.len()` always holds. A zero count with an annotated image
/// identical to the input copy is a valid result, not an error.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub annotated: RgbImage,
    pub boxes: Vec<BoundingBox>,
    pub count: usize,
}

/// Output of one mosaic composition run.
#[derive(Debug, Clone)]
pub struct MosaicResult {
    pub panorama: Option<DynamicImage>,
    pub succeeded: bool,
    pub failure_reason: Option<String>,
}

impl MosaicResult {
    pub fn success(panorama: DynamicImage) -> Self {
        Self {
            panorama: Some(panorama),
            succeeded: true,
            failure_reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            panorama: None,
            succeeded: false,
            failure_reason: Some(reason.into()),
        }
    }

    /// Structured error for a failed composition, `None` on success.
    pub fn to_error(&self) -> Option<Error> {
        if self.succeeded {
            return None;
        }
        let reason = self
            .failure_reason
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        Some(Error::Stitch(reason))
    }
}
