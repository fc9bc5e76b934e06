use image::Rgb;

use crate::models::Contour;

/// How a profile turns the (color-transformed) image into a binary mask.
///
/// Exactly one segmentation method applies per profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Segmentation {
    /// Fixed grayscale threshold; `inverted` keeps the dark side instead.
    FixedThreshold { threshold: u8, inverted: bool },
    /// Local-mean adaptive grayscale threshold over a
    /// `(2 * block_radius + 1)` square window, offset by `offset` gray
    /// levels.
    AdaptiveThreshold {
        block_radius: u32,
        offset: i16,
        inverted: bool,
    },
    /// Per-channel inclusion test in HSV space (hue scaled to 0..=179).
    HsvRange { lower: [u8; 3], upper: [u8; 3] },
}

/// Immutable configuration for one feature-extraction task.
///
/// The four detection tasks differ only in configuration, so they are all
/// instances of this record rather than separate code paths.
#[derive(Debug, Clone)]
pub struct ExtractionProfile {
    pub name: &'static str,
    /// Gaussian blur sigma for noise suppression; `None` skips the blur.
    /// Grayscale profiles blur the grayscale image before thresholding;
    /// range profiles blur the segmentation mask instead.
    pub blur_sigma: Option<f32>,
    pub segmentation: Segmentation,
    /// Radius of the morphological closing applied to the mask, if any.
    pub close_radius: Option<u8>,
    /// Contours with enclosed area below this are discarded.
    pub min_area: f64,
    /// Contours with enclosed area at or above this are discarded.
    pub max_area: Option<f64>,
    /// Require the surviving boundaries to be convex.
    pub require_convex: bool,
    pub annotation_color: Rgb<u8>,
}

impl ExtractionProfile {
    /// Vegetation blobs: adaptive threshold, large features only.
    pub fn tree() -> Self {
        Self {
            name: "tree",
            blur_sigma: Some(1.1),
            segmentation: Segmentation::AdaptiveThreshold {
                block_radius: 5,
                offset: 4,
                inverted: true,
            },
            close_radius: None,
            min_area: 1000.0,
            max_area: None,
            require_convex: false,
            annotation_color: Rgb([0, 255, 0]),
        }
    }

    /// Bounded sub-areas: dark regions under a fixed threshold, no size floor.
    pub fn area() -> Self {
        Self {
            name: "area",
            blur_sigma: Some(1.1),
            segmentation: Segmentation::FixedThreshold {
                threshold: 150,
                inverted: true,
            },
            close_radius: None,
            min_area: 0.0,
            max_area: None,
            require_convex: false,
            annotation_color: Rgb([0, 255, 0]),
        }
    }

    /// Discolored spots: a low-hue band, closed to merge broken fragments,
    /// kept only when small and convex.
    pub fn disease() -> Self {
        Self {
            name: "disease",
            blur_sigma: Some(2.0),
            segmentation: Segmentation::HsvRange {
                lower: [0, 50, 50],
                upper: [10, 255, 255],
            },
            close_radius: Some(2),
            min_area: 100.0,
            max_area: Some(1000.0),
            require_convex: true,
            annotation_color: Rgb([0, 255, 0]),
        }
    }

    /// Countable objects: anything brighter than black, large features only.
    pub fn object() -> Self {
        Self {
            name: "object",
            blur_sigma: None,
            segmentation: Segmentation::FixedThreshold {
                threshold: 1,
                inverted: false,
            },
            close_radius: None,
            min_area: 2000.0,
            max_area: None,
            require_convex: false,
            annotation_color: Rgb([0, 255, 0]),
        }
    }

    /// Look up one of the shipped profiles by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "tree" => Some(Self::tree()),
            "area" => Some(Self::area()),
            "disease" => Some(Self::disease()),
            "object" => Some(Self::object()),
            _ => None,
        }
    }

    /// Filtering predicate: area in `[min_area, max_area)` plus the optional
    /// convexity requirement.
    pub fn keeps(&self, contour: &Contour) -> bool {
        let area = contour.area();
        if area < self.min_area {
            return false;
        }
        if let Some(max) = self.max_area {
            if area >= max {
                return false;
            }
        }
        !self.require_convex || contour.is_convex()
    }
}
