//! Geometry arithmetic behind zoom, pan, rotate and flip.
//!
//! These functions mutate an [`ImageGeometry`] unconditionally; the viewer
//! decides whether an operation is allowed before calling them.

use crate::consts::{SNAP_LOWER, SNAP_UPPER};
use crate::geometry::Point;
use crate::layout::ImageGeometry;

/// Turn a relative zoom step into a factor: `-0.1` shrinks by `1/1.1`,
/// `0.1` grows by `1.1`.
pub fn relative_factor(step: f64) -> f64 {
    if step < 0.0 {
        1.0 / (1.0 - step)
    } else {
        1.0 + step
    }
}

/// Absolute ratio a relative zoom step leads to from the current size.
pub fn relative_zoom_target(image: &ImageGeometry, step: f64) -> f64 {
    image.width * relative_factor(step) / image.natural_width
}

pub fn clamp_ratio(ratio: f64, (min, max): (f64, f64)) -> f64 {
    ratio.max(min).min(max)
}

/// Ratios strictly inside the snap band become exactly 1.
pub fn snap_ratio(ratio: f64) -> f64 {
    if ratio > SNAP_LOWER && ratio < SNAP_UPPER {
        1.0
    } else {
        ratio
    }
}

/// Resize the image to `ratio` of its natural size.
///
/// With an anchor (page coordinates) the image point under it stays put;
/// without one the image grows or shrinks about its own center.
pub fn resize_to_ratio(image: &mut ImageGeometry, ratio: f64, anchor: Option<Point>, viewport_offset: Point) {
    let new_width = image.natural_width * ratio;
    let new_height = image.natural_height * ratio;
    let grow_x = new_width - image.width;
    let grow_y = new_height - image.height;

    match anchor {
        Some(point) if image.width > 0.0 && image.height > 0.0 => {
            image.left -= grow_x * ((point.x - viewport_offset.x - image.left) / image.width);
            image.top -= grow_y * ((point.y - viewport_offset.y - image.top) / image.height);
        }
        _ => {
            image.left -= grow_x / 2.0;
            image.top -= grow_y / 2.0;
        }
    }

    image.width = new_width;
    image.height = new_height;
    image.ratio = ratio;
}

/// Set the position; non-finite coordinates leave that axis alone.
/// Returns whether anything changed.
pub fn move_to(image: &mut ImageGeometry, x: f64, y: f64) -> bool {
    let mut changed = false;
    if x.is_finite() {
        image.left = x;
        changed = true;
    }
    if y.is_finite() {
        image.top = y;
        changed = true;
    }
    changed
}

pub fn translate(image: &mut ImageGeometry, dx: f64, dy: f64) -> bool {
    let (left, top) = (image.left, image.top);
    move_to(image, left + dx, top + dy)
}

/// Set the absolute rotation. Any finite angle is kept as is.
pub fn rotate_to(image: &mut ImageGeometry, degrees: f64) -> bool {
    if !degrees.is_finite() {
        return false;
    }
    image.rotate = Some(degrees);
    true
}

pub fn scale_to(image: &mut ImageGeometry, scale_x: f64, scale_y: f64) -> bool {
    let mut changed = false;
    if scale_x.is_finite() {
        image.scale_x = Some(scale_x);
        changed = true;
    }
    if scale_y.is_finite() {
        image.scale_y = Some(scale_y);
        changed = true;
    }
    changed
}

/// Mirror of an axis scale; an unset or zero scale flips to `-1`.
pub fn flipped(scale: Option<f64>) -> f64 {
    match scale {
        Some(s) if s != 0.0 && s.is_finite() => -s,
        _ => -1.0,
    }
}
