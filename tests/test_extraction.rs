//! Integration tests for the contour feature-extraction pipeline.
//!
//! Tests cover:
//! - Zero-count results on images with no matching features
//! - Counting and locating bright blobs with the object profile
//! - The permissive-profile invariant (count == traced external contours)
//! - Determinism of repeated extraction
//! - Disease-profile convexity and size filtering
//! - Tree- and area-profile behavior on dark features over bright ground

mod common;

use common::*;
use croplens::extraction::{contours, segmentation_mask};
use croplens::{BoundingBox, ExtractionProfile, Segmentation, extract};
use image::Rgb;

/// Profile with no filtering at all: every external contour survives.
fn permissive_profile() -> ExtractionProfile {
    ExtractionProfile {
        name: "permissive",
        blur_sigma: None,
        segmentation: Segmentation::FixedThreshold {
            threshold: 1,
            inverted: false,
        },
        close_radius: None,
        min_area: 0.0,
        max_area: None,
        require_convex: false,
        annotation_color: Rgb([255, 0, 0]),
    }
}

#[test]
fn all_black_image_yields_zero_count() {
    let img = solid_image(200, 200, BLACK);
    for profile in [ExtractionProfile::object(), ExtractionProfile::disease()] {
        let result = extract(&img, &profile);
        assert_eq!(result.count, 0, "profile {}", profile.name);
        assert!(result.boxes.is_empty(), "profile {}", profile.name);
        // Nothing survived, so the annotated copy equals the input.
        assert_eq!(result.annotated, img.to_rgb8(), "profile {}", profile.name);
    }
}

#[test]
fn all_white_image_is_one_full_frame_object() {
    let img = solid_image(500, 500, WHITE);
    let result = extract(&img, &ExtractionProfile::object());

    assert_eq!(result.count, 1);
    assert_eq!(
        result.boxes[0],
        BoundingBox {
            x: 0,
            y: 0,
            width: 500,
            height: 500
        }
    );
}

#[test]
fn single_bright_blob_is_located() {
    let img = image_with_rect(300, 300, (50, 60, 100, 100), WHITE);
    let result = extract(&img, &ExtractionProfile::object());

    assert_eq!(result.count, 1);
    assert_eq!(
        result.boxes[0],
        BoundingBox {
            x: 50,
            y: 60,
            width: 100,
            height: 100
        }
    );
}

#[test]
fn blobs_below_the_area_floor_are_ignored() {
    // 20x20 encloses well under the object profile's 2000 minimum.
    let img = image_with_rects(300, 300, &[(10, 10, 20, 20), (100, 100, 120, 120)], WHITE);
    let result = extract(&img, &ExtractionProfile::object());

    assert_eq!(result.count, 1);
    assert_eq!(result.boxes[0].x, 100);
    assert_eq!(result.boxes[0].y, 100);
}

#[test]
fn permissive_profile_counts_every_external_contour() {
    let img = image_with_rects(120, 120, &[(10, 10, 30, 30), (70, 70, 30, 30)], WHITE);
    let profile = permissive_profile();

    // 1. Trace the segmentation mask directly
    let mask = segmentation_mask(&img, &profile);
    let traced = contours::external_contours(&mask);

    // 2. Run the full pipeline
    let result = extract(&img, &profile);

    // 3. With no filtering, the count equals the traced contour count
    assert_eq!(result.count, traced.len());
    assert_eq!(result.count, 2);
    assert_eq!(result.boxes.len(), 2);
}

#[test]
fn extract_is_idempotent() {
    let img = image_with_rect(300, 300, (50, 60, 100, 100), WHITE);
    let profile = ExtractionProfile::object();

    let first = extract(&img, &profile);
    let second = extract(&img, &profile);

    assert_eq!(first.count, second.count);
    assert_eq!(first.boxes, second.boxes);
    assert_eq!(first.annotated, second.annotated);
}

#[test]
fn annotation_never_mutates_the_input() {
    let img = image_with_rect(300, 300, (50, 60, 100, 100), WHITE);
    let before = img.to_rgb8();

    let result = extract(&img, &ExtractionProfile::object());

    assert_eq!(img.to_rgb8(), before);
    // Something was drawn, so the annotated copy differs from the input.
    assert_ne!(result.annotated, before);
}

#[test]
fn disease_profile_finds_small_convex_discoloration() {
    let img = image_with_rect(200, 200, (92, 92, 16, 16), RED);
    let result = extract(&img, &ExtractionProfile::disease());

    assert_eq!(result.count, 1);
    let b = result.boxes[0];
    // Mask blurring may move the boundary by a pixel or two.
    assert!(b.width >= 12 && b.width <= 20, "width {}", b.width);
    assert!(b.height >= 12 && b.height <= 20, "height {}", b.height);
}

#[test]
fn disease_profile_rejects_concave_regions() {
    // An L-shaped patch: right size, wrong shape.
    let img = image_with_rects(200, 200, &[(80, 80, 30, 10), (80, 80, 10, 30)], RED);
    let result = extract(&img, &ExtractionProfile::disease());

    assert_eq!(result.count, 0);
}

#[test]
fn disease_profile_rejects_oversized_regions() {
    // 60x60 encloses well past the disease profile's 1000 maximum.
    let img = image_with_rect(200, 200, (60, 60, 60, 60), RED);
    let result = extract(&img, &ExtractionProfile::disease());

    assert_eq!(result.count, 0);
}

#[test]
fn area_profile_finds_a_dark_field_on_bright_ground() {
    // Dark vegetation patch on bright soil: the inverted fixed threshold
    // picks up the dark pixels.
    let img = image_on(200, 200, &[(60, 50, 40, 30)], Rgb([40, 40, 40]), WHITE);
    let result = extract(&img, &ExtractionProfile::area());

    assert_eq!(result.count, 1);
    let b = result.boxes[0];
    // Pre-segmentation blurring may move the boundary by a pixel or two.
    assert!(b.x.abs_diff(60) <= 3, "x {}", b.x);
    assert!(b.y.abs_diff(50) <= 3, "y {}", b.y);
    assert!(b.width.abs_diff(40) <= 6, "width {}", b.width);
    assert!(b.height.abs_diff(30) <= 6, "height {}", b.height);
}

#[test]
fn area_profile_sees_nothing_on_a_uniformly_bright_image() {
    let img = solid_image(200, 200, WHITE);
    let result = extract(&img, &ExtractionProfile::area());

    assert_eq!(result.count, 0);
    assert!(result.boxes.is_empty());
}

#[test]
fn tree_profile_counts_dark_crowns_against_bright_ground() {
    // Two well-separated dark crowns on bright ground. The adaptive
    // threshold responds to the local contrast at each crown's edge.
    let crowns = [(20, 20, 60, 60), (110, 110, 60, 60)];
    let img = image_on(200, 200, &crowns, Rgb([40, 40, 40]), WHITE);
    let result = extract(&img, &ExtractionProfile::tree());

    assert_eq!(result.count, 2);

    let mut boxes = result.boxes.clone();
    boxes.sort_by_key(|b| b.x);
    for (b, &(rx, ry, rw, rh)) in boxes.iter().zip(crowns.iter()) {
        assert!(b.x.abs_diff(rx) <= 4, "x {} vs {}", b.x, rx);
        assert!(b.y.abs_diff(ry) <= 4, "y {} vs {}", b.y, ry);
        assert!(b.width.abs_diff(rw) <= 8, "width {} vs {}", b.width, rw);
        assert!(b.height.abs_diff(rh) <= 8, "height {} vs {}", b.height, rh);
    }
}

#[test]
fn tree_profile_sees_nothing_on_a_uniformly_bright_image() {
    // No local contrast anywhere: the adaptive threshold's offset keeps
    // every pixel on the background side.
    let img = solid_image(200, 200, WHITE);
    let result = extract(&img, &ExtractionProfile::tree());

    assert_eq!(result.count, 0);
    assert!(result.boxes.is_empty());
}

#[test]
fn shipped_profiles_resolve_by_name() {
    for name in ["tree", "area", "disease", "object"] {
        let profile = ExtractionProfile::by_name(name).expect("known profile");
        assert_eq!(profile.name, name);
    }
    assert!(ExtractionProfile::by_name("unknown").is_none());
}
