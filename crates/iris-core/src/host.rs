//! Contracts the engine needs from its embedder.
//!
//! The engine never paints pixels or touches a platform API itself. It asks a
//! [`HostSurface`] for sizes and natural-size probes, hands it [`Render`]
//! commands, and asks a [`FullscreenController`] to enter or leave fullscreen.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH};
use crate::geometry::{transform_string, Point, Rect, Size};
use crate::layout::{ImageGeometry, ListLayout};

/// Kind of the node a viewer is attached to. Only elements can host one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
    Fragment,
}

/// Outcome of asking the host for an image's natural size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Probe {
    /// The size is known already (cached or synchronously decoded).
    Ready(Size),
    /// The host will call `Viewer::image_loaded` once the size is known.
    Pending,
}

/// A painted rectangle request for the active image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintRequest {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub rotate: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

impl PaintRequest {
    /// Zero-sized rectangle at `center`, the starting point of the grow-in.
    pub fn placeholder(center: Point) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            left: center.x,
            top: center.y,
            rotate: None,
            scale_x: None,
            scale_y: None,
        }
    }

    pub fn transform(&self) -> String {
        transform_string(self.rotate, self.scale_x, self.scale_y)
    }
}

impl From<&ImageGeometry> for PaintRequest {
    fn from(image: &ImageGeometry) -> Self {
        Self {
            width: image.width,
            height: image.height,
            left: image.left,
            top: image.top,
            rotate: image.rotate,
            scale_x: image.scale_x,
            scale_y: image.scale_y,
        }
    }
}

/// Visual state of the zoom tooltip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipState {
    /// Shown with the given text, e.g. `150%`.
    Shown(String),
    /// Fading out; the host reports the end of the fade.
    Fading,
    Hidden,
}

/// Everything the engine asks a host to draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Render {
    /// Outer bounds of the viewer (window in modal mode).
    Container(Size),
    /// Bounds of the area images are laid out in.
    Viewport(Size),
    /// Fade the viewer in or out. With transitions on, the host reports the
    /// end of the fade as `TransitionTarget::Viewer`.
    ViewerShown(bool),
    Image(PaintRequest),
    /// Make the image visible even though its size is still unknown.
    ImageVisible(bool),
    /// Enable or suspend the image's animated transition.
    ImageTransition(bool),
    Tooltip(TooltipState),
    Title(String),
    ListLayout(ListLayout),
    /// Cover-fitted thumbnail inside its navbar item.
    Thumbnail { index: usize, rect: Rect },
    /// A slideshow slide; `rect` is `None` until its natural size is known.
    Slide {
        index: usize,
        shown: bool,
        rect: Option<Rect>,
    },
    SlidesCleared,
}

/// Drawable surface the viewer is attached to.
pub trait HostSurface {
    /// Kind of the host node; anything but an element is rejected.
    fn node_kind(&self) -> NodeKind;

    /// Size of the element an inline viewer is mounted in.
    fn host_size(&self) -> Size;

    /// Inner size of the window.
    fn window_size(&self) -> Size;

    /// Page offset of the viewport's top-left corner.
    fn viewport_offset(&self) -> Point {
        Point::ORIGIN
    }

    /// Height of the footer (title, navbar and toolbar) below the image area.
    fn footer_height(&self) -> f64 {
        0.0
    }

    /// Size of one navbar thumbnail item.
    fn thumbnail_size(&self) -> Size {
        Size::new(DEFAULT_THUMBNAIL_WIDTH, DEFAULT_THUMBNAIL_HEIGHT)
    }

    /// Ask for the natural size of the image at `url`.
    fn probe(&mut self, url: &str) -> Probe;

    fn render(&mut self, command: Render);
}

/// Platform fullscreen API. Best effort: failures are not reported.
pub trait FullscreenController {
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
    fn is_fullscreen_active(&self) -> bool;
}

/// Controller for platforms without a fullscreen API.
#[derive(Debug, Default)]
pub struct NoFullscreen;

impl FullscreenController for NoFullscreen {
    fn request_fullscreen(&mut self) {}
    fn exit_fullscreen(&mut self) {}
    fn is_fullscreen_active(&self) -> bool {
        false
    }
}
