//! Viewport and image layout.
//!
//! Everything here is a pure function of sizes: the viewer calls into this
//! module whenever the viewport changes or a new image becomes active.

use serde::{Deserialize, Serialize};

use crate::consts::{FIT_MARGIN, THUMBNAIL_GAP};
use crate::geometry::{transform_string, Rect, Size};

/// Transform state of the active image.
///
/// `ratio == width / natural_width` holds after every operation of the
/// viewer, and `aspect_ratio` never changes for the lifetime of a geometry.
/// `rotate` and the scale axes are `None` when the matching capability is
/// disabled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub natural_width: f64,
    pub natural_height: f64,
    pub aspect_ratio: f64,
    pub ratio: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub rotate: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

impl ImageGeometry {
    pub fn natural_size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }

    /// CSS-style transform list for this geometry.
    pub fn transform(&self) -> String {
        transform_string(self.rotate, self.scale_x, self.scale_y)
    }

    /// Whether the whole image sits inside `viewport`.
    ///
    /// Only then may a one-finger swipe switch images; a zoomed-in image is
    /// panned instead.
    pub fn is_switchable(&self, viewport: Size) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.width <= viewport.width
            && self.height <= viewport.height
    }
}

/// Which transform capabilities seed the fitted geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FitCapabilities {
    pub rotatable: bool,
    pub scalable: bool,
}

/// Result of fitting an image: the geometry to display and its reset target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedImage {
    pub image: ImageGeometry,
    pub initial: ImageGeometry,
}

/// Fit an image of `natural` size into `viewport`, leaving room for the
/// footer.
///
/// The usable height is `max(viewport.height - footer_height, footer_height)`.
/// The image is scaled to the constraining side, then shrunk to 90% and
/// capped at its natural size, and centered. Rotation and scale are carried
/// over from `previous` when the capability is enabled; the reset target
/// always starts unrotated and unscaled.
pub fn fit_image(
    natural: Size,
    viewport: Size,
    footer_height: f64,
    previous: Option<&ImageGeometry>,
    caps: FitCapabilities,
) -> FittedImage {
    let viewer_width = viewport.width;
    let viewer_height = (viewport.height - footer_height).max(footer_height);

    let (width, height, aspect_ratio, ratio) = if natural.is_degenerate() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let aspect_ratio = natural.width / natural.height;
        let mut width = viewer_width;
        let mut height = viewer_height;

        if viewer_height * aspect_ratio > viewer_width {
            height = viewer_width / aspect_ratio;
        } else {
            width = viewer_height * aspect_ratio;
        }

        let width = (width * FIT_MARGIN).min(natural.width);
        let height = (height * FIT_MARGIN).min(natural.height);
        (width, height, aspect_ratio, width / natural.width)
    };

    let initial = ImageGeometry {
        natural_width: natural.width,
        natural_height: natural.height,
        aspect_ratio,
        ratio,
        width,
        height,
        left: (viewer_width - width) / 2.0,
        top: (viewer_height - height) / 2.0,
        rotate: caps.rotatable.then_some(0.0),
        scale_x: caps.scalable.then_some(1.0),
        scale_y: caps.scalable.then_some(1.0),
    };

    let mut image = initial;
    if caps.rotatable {
        image.rotate = Some(previous.and_then(|p| p.rotate).unwrap_or(0.0));
    }
    if caps.scalable {
        image.scale_x = Some(carried_scale(previous.and_then(|p| p.scale_x)));
        image.scale_y = Some(carried_scale(previous.and_then(|p| p.scale_y)));
    }

    FittedImage { image, initial }
}

/// A zero scale is as good as unset when carried to the next image.
fn carried_scale(previous: Option<f64>) -> f64 {
    previous.filter(|s| *s != 0.0 && s.is_finite()).unwrap_or(1.0)
}

/// Outer bounds of the viewer.
///
/// Modal viewers cover the window; inline viewers take the host element's
/// size, but never less than the configured minimum.
pub fn fit_container(inline: bool, window: Size, host: Size, min: Size) -> Size {
    if inline {
        Size::new(host.width.max(min.width), host.height.max(min.height))
    } else {
        window
    }
}

/// How an image is placed into a fixed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Cover the whole frame, cropping the overflow (navbar thumbnails).
    Cover,
    /// Fit entirely inside the frame (slideshow slides).
    Contain,
}

/// Place an image of `natural` size centered into `frame`.
pub fn fit_into(natural: Size, frame: Size, mode: FitMode) -> Rect {
    if natural.is_degenerate() {
        return Rect {
            left: frame.width / 2.0,
            top: frame.height / 2.0,
            width: 0.0,
            height: 0.0,
        };
    }

    let aspect_ratio = natural.width / natural.height;
    let mut width = frame.width;
    let mut height = frame.height;
    let wider_than_frame = frame.height * aspect_ratio > frame.width;

    match (mode, wider_than_frame) {
        (FitMode::Cover, true) => width = frame.height * aspect_ratio,
        (FitMode::Cover, false) => height = frame.width / aspect_ratio,
        (FitMode::Contain, true) => height = frame.width / aspect_ratio,
        (FitMode::Contain, false) => width = frame.height * aspect_ratio,
    }

    Rect {
        left: (frame.width - width) / 2.0,
        top: (frame.height - height) / 2.0,
        width,
        height,
    }
}

/// Geometry of the navbar thumbnail strip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListLayout {
    pub width: f64,
    pub margin_left: f64,
}

/// Strip layout that puts thumbnail `index` in the middle of the viewport.
pub fn list_layout(item_width: f64, viewport_width: f64, index: usize, length: usize) -> ListLayout {
    let outer_width = item_width + THUMBNAIL_GAP;
    ListLayout {
        width: outer_width * length as f64,
        margin_left: (viewport_width - item_width) / 2.0 - outer_width * index as f64,
    }
}
