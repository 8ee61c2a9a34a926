//! Small geometric helpers shared by layout, gestures and transforms.
//!
//! All coordinates are page coordinates in CSS pixels.

use serde::{Deserialize, Serialize};

/// A point in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` if either side is zero or not a finite number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle placed relative to its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One tracked pointer: where it was at the last processed sample and where
/// it is now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerRecord {
    pub start: Point,
    pub end: Point,
}

impl PointerRecord {
    /// A freshly pressed pointer starts and ends at the same spot.
    pub fn at(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Displacement since the last processed sample.
    pub fn offset(&self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }
}

/// Centroid of the start points of a group of pointers.
///
/// Returns `None` for an empty group.
pub fn pointers_center<'a>(pointers: impl IntoIterator<Item = &'a PointerRecord>) -> Option<Point> {
    let mut sum = Point::ORIGIN;
    let mut count = 0usize;
    for pointer in pointers {
        sum.x += pointer.start.x;
        sum.y += pointer.start.y;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(Point::new(sum.x / count as f64, sum.y / count as f64))
}

/// Pinch ratio of a pointer pair: relative change of their separation,
/// `(z2 - z1) / z1`. `None` when the pair started on the same spot.
pub fn pinch_ratio(a: &PointerRecord, b: &PointerRecord) -> Option<f64> {
    let z1 = (a.start.x - b.start.x).hypot(a.start.y - b.start.y);
    let z2 = (a.end.x - b.end.x).hypot(a.end.y - b.end.y);
    if z1 == 0.0 {
        return None;
    }
    Some((z2 - z1) / z1)
}

/// The pinch ratio with the largest magnitude among every pointer pair.
///
/// Pairs whose start separation is zero carry no usable ratio and are
/// skipped. On equal magnitudes the first pair in iteration order wins.
pub fn max_zoom_ratio(pointers: &[PointerRecord]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, a) in pointers.iter().enumerate() {
        for b in &pointers[i + 1..] {
            let Some(ratio) = pinch_ratio(a, b) else {
                continue;
            };
            match best {
                Some(current) if current.abs() >= ratio.abs() => {}
                _ => best = Some(ratio),
            }
        }
    }
    best
}

/// Compose the CSS-style transform list for a rotation and an axis scale.
///
/// Missing parts are left out; with neither present the result is `none`.
pub fn transform_string(rotate: Option<f64>, scale_x: Option<f64>, scale_y: Option<f64>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(degrees) = rotate.filter(|d| d.is_finite()) {
        parts.push(format!("rotate({degrees}deg)"));
    }
    if let (Some(x), Some(y)) = (scale_x, scale_y) {
        if x.is_finite() && y.is_finite() {
            parts.push(format!("scale({x},{y})"));
        }
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}

/// File name part of an image URL, without query or fragment.
///
/// `http://domain.com/path/to/picture.jpg?size=1280×960` gives `picture.jpg`.
pub fn image_name_from_url(url: &str) -> &str {
    let name = url.rsplit('/').next().unwrap_or(url);
    match name.find(['?', '&', '#']) {
        Some(cut) => &name[..cut],
        None => name,
    }
}
