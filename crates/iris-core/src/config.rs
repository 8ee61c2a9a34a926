use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM_STEP, MAX_ZOOM_RATIO, MIN_ZOOM_RATIO};
use crate::geometry::Size;
use crate::layout::FitCapabilities;
use crate::source::SourceImage;

/// Options of one viewer. Fixed for the viewer's lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Mount inside the host element instead of as a modal overlay.
    pub inline: bool,
    pub button: Visibility,
    pub navbar: Visibility,
    pub title: Visibility,
    pub toolbar: Visibility,
    pub tooltip: Visibility,
    pub movable: bool,
    pub zoomable: bool,
    pub rotatable: bool,
    pub scalable: bool,
    /// Animate state changes; the host reports when each animation ends.
    pub transition: bool,
    /// Request platform fullscreen while a slideshow plays.
    pub fullscreen: bool,
    pub keyboard: bool,
    /// Slideshow period in milliseconds. Zero disables auto-advance.
    pub interval: u64,
    /// Minimum inline viewport size.
    pub min_width: f64,
    pub min_height: f64,
    /// Step of wheel and keyboard zoom.
    pub zoom_ratio: f64,
    pub min_zoom_ratio: f64,
    pub max_zoom_ratio: f64,
    pub z_index: i32,
    pub z_index_inline: i32,
    /// Where the full-resolution URL of each image comes from.
    pub url: UrlSource,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            inline: false,
            button: Visibility::Visible,
            navbar: Visibility::Visible,
            title: Visibility::Visible,
            toolbar: Visibility::Visible,
            tooltip: Visibility::Visible,
            movable: true,
            zoomable: true,
            rotatable: true,
            scalable: true,
            transition: true,
            fullscreen: true,
            keyboard: true,
            interval: 5000,
            min_width: 200.0,
            min_height: 100.0,
            zoom_ratio: 0.1,
            min_zoom_ratio: 0.01,
            max_zoom_ratio: 100.0,
            z_index: 2015,
            z_index_inline: 0,
            url: UrlSource::Src,
        }
    }
}

impl ViewerConfig {
    /// Range every clamped zoom lands in.
    pub fn zoom_bounds(&self) -> (f64, f64) {
        (
            MIN_ZOOM_RATIO.max(self.min_zoom_ratio),
            MAX_ZOOM_RATIO.min(self.max_zoom_ratio),
        )
    }

    /// Wheel zoom step, falling back to 0.1 when unset or unusable.
    pub fn wheel_step(&self) -> f64 {
        if self.zoom_ratio.is_finite() && self.zoom_ratio != 0.0 {
            self.zoom_ratio
        } else {
            DEFAULT_ZOOM_STEP
        }
    }

    pub fn fit_capabilities(&self) -> FitCapabilities {
        FitCapabilities {
            rotatable: self.rotatable,
            scalable: self.scalable,
        }
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn slideshow_interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Stacking order of the viewer element.
    pub fn effective_z_index(&self) -> i32 {
        if self.inline {
            self.z_index_inline
        } else {
            self.z_index
        }
    }
}

/// Visibility of an optional piece of chrome.
///
/// Configured as a bool or as a responsive breakpoint: `2` hides it on
/// extra-small screens, `3` up to small screens, `4` up to medium screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VisibilityRepr", into = "VisibilityRepr")]
pub enum Visibility {
    Visible,
    Hidden,
    HiddenXsDown,
    HiddenSmDown,
    HiddenMdDown,
}

impl Visibility {
    /// `false` only when switched off entirely.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Visibility::Hidden)
    }

    /// CSS class a host applies to the element, if any.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Visibility::Visible => None,
            Visibility::Hidden => Some("viewer-hide"),
            Visibility::HiddenXsDown => Some("viewer-hide-xs-down"),
            Visibility::HiddenSmDown => Some("viewer-hide-sm-down"),
            Visibility::HiddenMdDown => Some("viewer-hide-md-down"),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Visible => write!(f, "visible"),
            Visibility::Hidden => write!(f, "hidden"),
            Visibility::HiddenXsDown => write!(f, "hidden below sm"),
            Visibility::HiddenSmDown => write!(f, "hidden below md"),
            Visibility::HiddenMdDown => write!(f, "hidden below lg"),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum VisibilityRepr {
    Flag(bool),
    Breakpoint(u8),
}

impl TryFrom<VisibilityRepr> for Visibility {
    type Error = String;

    fn try_from(repr: VisibilityRepr) -> Result<Self, Self::Error> {
        match repr {
            VisibilityRepr::Flag(true) => Ok(Visibility::Visible),
            VisibilityRepr::Flag(false) => Ok(Visibility::Hidden),
            VisibilityRepr::Breakpoint(2) => Ok(Visibility::HiddenXsDown),
            VisibilityRepr::Breakpoint(3) => Ok(Visibility::HiddenSmDown),
            VisibilityRepr::Breakpoint(4) => Ok(Visibility::HiddenMdDown),
            VisibilityRepr::Breakpoint(n) => {
                Err(format!("unknown visibility breakpoint {n}, expected 2, 3 or 4"))
            }
        }
    }
}

impl From<Visibility> for VisibilityRepr {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => VisibilityRepr::Flag(true),
            Visibility::Hidden => VisibilityRepr::Flag(false),
            Visibility::HiddenXsDown => VisibilityRepr::Breakpoint(2),
            Visibility::HiddenSmDown => VisibilityRepr::Breakpoint(3),
            Visibility::HiddenMdDown => VisibilityRepr::Breakpoint(4),
        }
    }
}

/// Maps a source image to its full-resolution URL.
pub type UrlResolver = Arc<dyn Fn(&SourceImage) -> Option<String> + Send + Sync>;

/// Where the full-resolution URL of a source image comes from.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSource {
    /// The image's own source.
    #[default]
    Src,
    /// A named attribute of the source element, e.g. `data-original`.
    Attribute(String),
    /// A programmatic resolver. Cannot be written to a config file.
    #[serde(skip)]
    Resolver(UrlResolver),
}

impl UrlSource {
    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&SourceImage) -> Option<String> + Send + Sync + 'static,
    {
        UrlSource::Resolver(Arc::new(f))
    }

    /// Resolve the URL configured for `image`, if any.
    pub fn resolve(&self, image: &SourceImage) -> Option<String> {
        match self {
            UrlSource::Src => image.src.clone(),
            UrlSource::Attribute(name) => image.attributes.get(name).cloned(),
            UrlSource::Resolver(f) => f(image),
        }
    }
}

impl std::fmt::Debug for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlSource::Src => write!(f, "Src"),
            UrlSource::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            UrlSource::Resolver(_) => write!(f, "Resolver(..)"),
        }
    }
}
