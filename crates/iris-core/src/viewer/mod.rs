//! The viewer: lifecycle, view switching, transforms and playback.
//!
//! A [`Viewer`] is driven entirely from outside. The host calls its methods,
//! feeds it [`InputEvent`](crate::input::InputEvent)s, reports natural sizes through
//! [`Viewer::image_loaded`] and moves its clock with [`Viewer::advance`].
//! Every operation that is not allowed in the current state is a silent
//! no-op.

mod handlers;
mod methods;
mod state;

pub use state::{HideStep, Lifecycle, Session, TooltipPhase, ViewStage};

use std::time::Duration;

use tracing::debug;

use crate::config::ViewerConfig;
use crate::error::{IrisError, Result};
use crate::events::{EventBus, EventFlow, EventKind, ListenerId, ViewerEvent};
use crate::geometry::{Point, Size};
use crate::gesture::{GestureAction, GestureTracker, PointerMap};
use crate::host::{FullscreenController, HostSurface, NodeKind, Probe, Render};
use crate::layout::{fit_container, fit_into, list_layout, FitMode, ImageGeometry};
use crate::source::{build_items, ImageItem, SourceImage};
use crate::timer::{TimerKind, TimerQueue};

/// What a pending natural-size probe is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadUse {
    View(usize),
    Slide(usize),
    Thumbnail(usize),
}

#[derive(Clone, Debug)]
struct PendingLoad {
    url: String,
    usage: LoadUse,
}

pub struct Viewer<S: HostSurface, F: FullscreenController> {
    surface: S,
    fullscreen: F,
    config: ViewerConfig,
    sources: Vec<SourceImage>,
    items: Vec<ImageItem>,
    index: usize,
    /// Image to view once a modal show completes.
    target: Option<usize>,
    lifecycle: Lifecycle,
    container: Size,
    viewport: Size,
    /// Whether input is being listened to.
    bound: bool,
    gesture: GestureTracker,
    /// The image transition is suspended for a drag.
    drag_suspended: bool,
    tooltip: TooltipPhase,
    timers: TimerQueue,
    pending: Vec<PendingLoad>,
    events: EventBus,
}

impl<S: HostSurface, F: FullscreenController> Viewer<S, F> {
    /// Attach a viewer to `surface`. Fails only if the host is not an
    /// element node.
    pub fn new(surface: S, fullscreen: F, images: Vec<SourceImage>, config: ViewerConfig) -> Result<Self> {
        let kind = surface.node_kind();
        if kind != NodeKind::Element {
            return Err(IrisError::InvalidHost(kind));
        }

        let items = build_items(&images, &config.url);
        debug!(sources = images.len(), items = items.len(), inline = config.inline, "Viewer created");

        Ok(Self {
            surface,
            fullscreen,
            config,
            sources: images,
            items,
            index: 0,
            target: None,
            lifecycle: Lifecycle::Unbuilt,
            container: Size::default(),
            viewport: Size::default(),
            bound: false,
            gesture: GestureTracker::new(),
            drag_suspended: false,
            tooltip: TooltipPhase::Hidden,
            timers: TimerQueue::new(),
            pending: Vec::new(),
            events: EventBus::default(),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn fullscreen(&self) -> &F {
        &self.fullscreen
    }

    pub fn fullscreen_mut(&mut self) -> &mut F {
        &mut self.fullscreen
    }

    pub fn sources(&self) -> &[SourceImage] {
        &self.sources
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Active image, or the shown slide while a slideshow plays.
    pub fn index(&self) -> usize {
        match self.lifecycle.session().and_then(|s| s.playback.as_ref()) {
            Some(playback) => playback.current(),
            None => self.index,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_built(&self) -> bool {
        self.lifecycle.is_built()
    }

    pub fn is_visible(&self) -> bool {
        self.lifecycle.session().is_some()
    }

    pub fn is_viewed(&self) -> bool {
        self.lifecycle.session().is_some_and(Session::is_viewed)
    }

    pub fn is_fulled(&self) -> bool {
        self.lifecycle.session().is_some_and(|s| s.fulled)
    }

    pub fn is_played(&self) -> bool {
        self.lifecycle.session().is_some_and(Session::is_played)
    }

    pub fn is_transitioning(&self) -> bool {
        self.lifecycle.is_transitioning()
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Destroyed)
    }

    pub fn is_wheeling(&self) -> bool {
        self.timers.is_pending(TimerKind::WheelDebounce)
    }

    pub fn tooltip_phase(&self) -> TooltipPhase {
        self.tooltip
    }

    /// Current geometry of the viewed image.
    pub fn image(&self) -> Option<&ImageGeometry> {
        self.lifecycle.session().and_then(Session::image)
    }

    /// Geometry `reset()` returns to.
    pub fn initial_image(&self) -> Option<&ImageGeometry> {
        self.lifecycle.session().and_then(Session::initial_image)
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn gesture_action(&self) -> GestureAction {
        self.gesture.action()
    }

    pub fn pointers(&self) -> &PointerMap {
        self.gesture.pointers()
    }

    /// Time on the engine clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn has_timer(&self, kind: TimerKind) -> bool {
        self.timers.is_pending(kind)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn subscribe<L>(&mut self, kind: EventKind, listener: L) -> ListenerId
    where
        L: FnMut(&ViewerEvent) -> EventFlow + 'static,
    {
        self.events.subscribe(kind, Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Host callbacks
    // ------------------------------------------------------------------

    /// Move the engine clock forward, firing due timers in deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(kind) = self.timers.pop_due(until) {
            self.fire(kind);
        }
        self.timers.set_now(until);
    }

    /// The natural size of the image at `url` is now known. Resolves every
    /// pending use of it: the viewed image, slides and thumbnails.
    pub fn image_loaded(&mut self, url: &str, natural: Size) {
        let (resolved, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.url == url);
        self.pending = rest;

        for load in resolved {
            match load.usage {
                LoadUse::View(index) => {
                    let waiting = matches!(
                        self.lifecycle.session().map(|s| &s.stage),
                        Some(ViewStage::Loading { index: i, .. }) if *i == index
                    );
                    if waiting {
                        self.load(natural);
                    }
                }
                LoadUse::Slide(index) => self.fit_slide(index, natural),
                LoadUse::Thumbnail(index) => self.render_thumbnail(index, natural),
            }
        }
    }

    // ------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------

    fn emit(&mut self, event: ViewerEvent) -> EventFlow {
        self.events.emit(&event)
    }

    /// Geometry of the viewed image when transforms are allowed: viewed and
    /// not playing.
    fn editable(&self) -> Option<(ImageGeometry, ImageGeometry)> {
        let session = self.lifecycle.session()?;
        if session.is_played() {
            return None;
        }
        match &session.stage {
            ViewStage::Viewed { image, initial } => Some((*image, *initial)),
            _ => None,
        }
    }

    /// Store a new geometry for the viewed image and paint it.
    fn commit_image(&mut self, geometry: ImageGeometry) {
        if let Some(ViewStage::Viewed { image, .. }) = self.lifecycle.session_mut().map(|s| &mut s.stage) {
            *image = geometry;
            self.surface.render(Render::Image((&geometry).into()));
        }
    }

    fn init_container(&mut self) {
        self.container = self.surface.window_size();
    }

    fn init_viewport(&mut self, fulled: bool) {
        self.viewport = if fulled || !self.config.inline {
            self.container
        } else {
            fit_container(true, self.container, self.surface.host_size(), self.config.min_size())
        };
    }

    fn render_frame(&mut self) {
        self.surface.render(Render::Container(self.container));
        self.surface.render(Render::Viewport(self.viewport));
    }

    fn render_list(&mut self) {
        let item = self.surface.thumbnail_size();
        let layout = list_layout(item.width, self.viewport.width, self.index, self.items.len());
        self.surface.render(Render::ListLayout(layout));
    }

    /// Probe every thumbnail and paint those whose size is known.
    fn init_list(&mut self) {
        self.pending.retain(|p| !matches!(p.usage, LoadUse::Thumbnail(_)));
        let sources: Vec<String> = self.items.iter().map(|item| item.src.clone()).collect();
        for (index, url) in sources.into_iter().enumerate() {
            match self.surface.probe(&url) {
                Probe::Ready(natural) => self.render_thumbnail(index, natural),
                Probe::Pending => self.pending.push(PendingLoad {
                    url,
                    usage: LoadUse::Thumbnail(index),
                }),
            }
        }
    }

    fn render_thumbnail(&mut self, index: usize, natural: Size) {
        if index >= self.items.len() {
            return;
        }
        let rect = fit_into(natural, self.surface.thumbnail_size(), FitMode::Cover);
        self.surface.render(Render::Thumbnail { index, rect });
    }

    fn fit_slide(&mut self, index: usize, natural: Size) {
        let frame = self.viewport;
        let slide = self
            .lifecycle
            .session_mut()
            .and_then(|s| s.playback.as_mut())
            .and_then(|p| p.fit(index, natural, frame));
        if let Some(slide) = slide {
            self.surface.render(Render::Slide {
                index,
                shown: slide.shown,
                rect: slide.rect,
            });
        }
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    fn drop_pending(&mut self, keep: impl Fn(LoadUse) -> bool) {
        self.pending.retain(|p| keep(p.usage));
    }
}

impl<S: HostSurface, F: FullscreenController> std::fmt::Debug for Viewer<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("lifecycle", &self.lifecycle.name())
            .field("index", &self.index)
            .field("items", &self.items.len())
            .field("viewport", &self.viewport)
            .field("now", &self.timers.now())
            .finish()
    }
}
