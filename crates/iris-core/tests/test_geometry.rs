use approx::assert_relative_eq;

use iris_core::geometry::{
    image_name_from_url, max_zoom_ratio, pinch_ratio, pointers_center, transform_string, Point,
    PointerRecord, Size,
};

fn record(sx: f64, sy: f64, ex: f64, ey: f64) -> PointerRecord {
    PointerRecord {
        start: Point::new(sx, sy),
        end: Point::new(ex, ey),
    }
}

// ---------------------------------------------------------------------------
// Pointer centroid
// ---------------------------------------------------------------------------

#[test]
fn test_pointers_center_of_two() {
    let pointers = [record(0.0, 0.0, 50.0, 50.0), record(100.0, 40.0, 0.0, 0.0)];
    let center = pointers_center(&pointers).unwrap();
    assert_relative_eq!(center.x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(center.y, 20.0, epsilon = 1e-9);
}

#[test]
fn test_pointers_center_uses_start_points() {
    let pointers = [record(10.0, 10.0, 500.0, 500.0)];
    let center = pointers_center(&pointers).unwrap();
    assert_eq!(center, Point::new(10.0, 10.0));
}

#[test]
fn test_pointers_center_empty() {
    let pointers: [PointerRecord; 0] = [];
    assert!(pointers_center(&pointers).is_none());
}

// ---------------------------------------------------------------------------
// Pinch ratio
// ---------------------------------------------------------------------------

#[test]
fn test_pinch_ratio_spread() {
    // Separation grows from 100 to 150.
    let a = record(0.0, 0.0, 0.0, 0.0);
    let b = record(100.0, 0.0, 150.0, 0.0);
    assert_relative_eq!(pinch_ratio(&a, &b).unwrap(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_pinch_ratio_pinch() {
    let a = record(0.0, 0.0, 25.0, 0.0);
    let b = record(100.0, 0.0, 75.0, 0.0);
    assert_relative_eq!(pinch_ratio(&a, &b).unwrap(), -0.5, epsilon = 1e-9);
}

#[test]
fn test_pinch_ratio_coincident_start() {
    let a = record(10.0, 10.0, 0.0, 0.0);
    let b = record(10.0, 10.0, 50.0, 50.0);
    assert!(pinch_ratio(&a, &b).is_none());
}

#[test]
fn test_max_zoom_ratio_two_pointers() {
    let pointers = [record(0.0, 0.0, 0.0, 0.0), record(0.0, 100.0, 0.0, 120.0)];
    assert_relative_eq!(max_zoom_ratio(&pointers).unwrap(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_max_zoom_ratio_picks_largest_magnitude() {
    // Pairs: (a,b) 100 -> 110 = 0.1, (a,c) 100 -> 40 = -0.6, (b,c) ~141 -> ~118.
    let a = record(0.0, 0.0, 0.0, 0.0);
    let b = record(100.0, 0.0, 110.0, 0.0);
    let c = record(0.0, 100.0, 0.0, 40.0);
    let ratio = max_zoom_ratio(&[a, b, c]).unwrap();
    assert_relative_eq!(ratio, -0.6, epsilon = 1e-12);
}

#[test]
fn test_max_zoom_ratio_skips_degenerate_pairs() {
    let a = record(0.0, 0.0, 0.0, 0.0);
    let b = record(0.0, 0.0, 10.0, 0.0);
    assert!(max_zoom_ratio(&[a, b]).is_none());
    assert!(max_zoom_ratio(&[a]).is_none());
}

// ---------------------------------------------------------------------------
// Transform strings
// ---------------------------------------------------------------------------

#[test]
fn test_transform_string_full() {
    assert_eq!(transform_string(Some(90.0), Some(-1.0), Some(1.0)), "rotate(90deg) scale(-1,1)");
}

#[test]
fn test_transform_string_rotation_only() {
    assert_eq!(transform_string(Some(-450.0), None, None), "rotate(-450deg)");
}

#[test]
fn test_transform_string_none() {
    assert_eq!(transform_string(None, None, None), "none");
}

#[test]
fn test_transform_string_needs_both_axes() {
    assert_eq!(transform_string(None, Some(2.0), None), "none");
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[test]
fn test_image_name_from_url() {
    assert_eq!(
        image_name_from_url("http://domain.com/path/to/picture.jpg?size=1280x960"),
        "picture.jpg"
    );
    assert_eq!(image_name_from_url("picture.png#top"), "picture.png");
    assert_eq!(image_name_from_url("/a/b/c.gif&x=1"), "c.gif");
    assert_eq!(image_name_from_url("http://domain.com/dir/"), "");
}

#[test]
fn test_size_degenerate() {
    assert!(Size::new(0.0, 10.0).is_degenerate());
    assert!(Size::new(10.0, f64::NAN).is_degenerate());
    assert!(!Size::new(1.0, 1.0).is_degenerate());
}
