use crate::layout::ImageGeometry;
use crate::slideshow::Slideshow;

/// Progress of the active image.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewStage {
    /// Nothing to view.
    Empty,
    /// Waiting for the natural size of image `index`. `previous` is the
    /// geometry whose rotation and scale carry over.
    Loading {
        index: usize,
        previous: Option<ImageGeometry>,
    },
    /// Laid out and painted.
    Viewed {
        image: ImageGeometry,
        initial: ImageGeometry,
    },
}

/// State that only exists while the viewer is on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// Occupying the whole window: always for a modal viewer, after `full()`
    /// for an inline one.
    pub fulled: bool,
    pub stage: ViewStage,
    pub playback: Option<Slideshow>,
}

impl Session {
    pub fn new(fulled: bool) -> Self {
        Self {
            fulled,
            stage: ViewStage::Empty,
            playback: None,
        }
    }

    pub fn is_viewed(&self) -> bool {
        matches!(self.stage, ViewStage::Viewed { .. })
    }

    pub fn is_played(&self) -> bool {
        self.playback.is_some()
    }

    pub fn image(&self) -> Option<&ImageGeometry> {
        match &self.stage {
            ViewStage::Viewed { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn initial_image(&self) -> Option<&ImageGeometry> {
        match &self.stage {
            ViewStage::Viewed { initial, .. } => Some(initial),
            _ => None,
        }
    }
}

/// Which half of the modal hide animation is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideStep {
    /// The image shrinks to nothing.
    ZoomOut,
    /// The viewer fades out.
    FadeOut,
}

/// Where the viewer is in its life.
///
/// `Destroyed` behaves like `Unbuilt` but can never be built again.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Lifecycle {
    #[default]
    Unbuilt,
    /// Built but not shown (modal viewers between show and hide).
    Built,
    /// The modal show animation is running.
    Showing,
    Visible(Session),
    /// The modal hide animation is running.
    Hiding { session: Session, step: HideStep },
    Destroyed,
}

impl Lifecycle {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Lifecycle::Visible(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Lifecycle::Visible(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_built(&self) -> bool {
        !matches!(self, Lifecycle::Unbuilt | Lifecycle::Destroyed)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Lifecycle::Showing | Lifecycle::Hiding { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lifecycle::Unbuilt => "unbuilt",
            Lifecycle::Built => "built",
            Lifecycle::Showing => "showing",
            Lifecycle::Visible(_) => "visible",
            Lifecycle::Hiding { .. } => "hiding",
            Lifecycle::Destroyed => "destroyed",
        }
    }
}

/// Phase of the zoom tooltip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipPhase {
    #[default]
    Hidden,
    Shown,
    Fading,
}
