use tracing::{debug, info};

use crate::consts::{LOAD_FALLBACK, TOOLTIP_DURATION};
use crate::events::{EventFlow, ViewerEvent};
use crate::geometry::{Point, Size};
use crate::host::{FullscreenController, HostSurface, PaintRequest, Probe, Render, TooltipState};
use crate::layout::fit_image;
use crate::slideshow::Slideshow;
use crate::source::{build_items, changed_positions, SourceImage};
use crate::timer::TimerKind;
use crate::transform;

use super::{HideStep, Lifecycle, LoadUse, PendingLoad, Session, TooltipPhase, ViewStage, Viewer};

/// Where a zoom request comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum ZoomOrigin {
    /// A method call: clamped, anchored on the image center.
    Api,
    /// A live pointer or wheel event: clamped, snapped near 1, anchored on
    /// the given page position.
    Event(Point),
    /// The hide animation: unclamped, anchored on the image center.
    Bypass,
}

impl<S: HostSurface, F: FullscreenController> Viewer<S, F> {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Build the viewer. Inline viewers become visible and view the first
    /// image right away; modal viewers wait for `show()`.
    pub fn build(&mut self) {
        if self.lifecycle.is_built() || self.is_destroyed() {
            return;
        }
        if self.items.is_empty() {
            debug!("Nothing to build, no images");
            return;
        }

        self.lifecycle = Lifecycle::Built;
        self.init_list();
        info!(images = self.items.len(), inline = self.config.inline, "Viewer built");

        if self.config.inline {
            self.init_container();
            self.init_viewport(false);
            self.render_frame();
            self.bound = true;
            self.lifecycle = Lifecycle::Visible(Session::new(false));
            self.emit(ViewerEvent::Ready);
            self.view(self.index);
        }
    }

    /// Show a modal viewer, building it first if needed.
    pub fn show(&mut self) {
        if self.config.inline || self.lifecycle.is_transitioning() {
            return;
        }
        if !matches!(self.lifecycle, Lifecycle::Unbuilt | Lifecycle::Built) {
            return;
        }
        if !self.lifecycle.is_built() {
            self.build();
            if !self.lifecycle.is_built() {
                return;
            }
        }
        if self.emit(ViewerEvent::Show) == EventFlow::Prevent {
            debug!("Show prevented by listener");
            return;
        }

        self.surface.render(Render::ViewerShown(true));
        if self.config.transition {
            self.lifecycle = Lifecycle::Showing;
        } else {
            self.shown();
        }
    }

    /// Remember image `index` and show the modal viewer on it.
    pub fn start(&mut self, index: usize) {
        if self.config.inline || index >= self.items.len() {
            return;
        }
        self.target = Some(index);
        self.show();
    }

    pub(super) fn shown(&mut self) {
        self.init_container();
        self.init_viewport(true);
        self.lifecycle = Lifecycle::Visible(Session::new(true));
        self.render_frame();
        self.bound = true;
        info!("Viewer shown");
        self.emit(ViewerEvent::Shown);

        let index = self.target.take().unwrap_or(self.index);
        self.view(index);
    }

    /// Hide a modal viewer. Playback stops first.
    pub fn hide(&mut self) {
        if self.config.inline || self.lifecycle.is_transitioning() || !self.is_visible() {
            return;
        }
        if self.emit(ViewerEvent::Hide) == EventFlow::Prevent {
            debug!("Hide prevented by listener");
            return;
        }

        self.stop();

        if self.is_viewed() && self.config.transition {
            self.zoom_to_origin(0.0, false, ZoomOrigin::Bypass);
            if let Lifecycle::Visible(session) = std::mem::replace(&mut self.lifecycle, Lifecycle::Built) {
                self.lifecycle = Lifecycle::Hiding {
                    session,
                    step: HideStep::ZoomOut,
                };
            }
        } else {
            self.surface.render(Render::ViewerShown(false));
            self.hidden();
        }
    }

    pub(super) fn hidden(&mut self) {
        self.lifecycle = Lifecycle::Built;
        self.bound = false;
        self.gesture.clear();
        self.drag_suspended = false;
        self.timers.clear();
        self.tooltip = TooltipPhase::Hidden;
        self.drop_pending(|usage| matches!(usage, LoadUse::Thumbnail(_)));

        self.surface.render(Render::Tooltip(TooltipState::Hidden));
        self.surface.render(Render::ImageVisible(false));
        self.surface.render(Render::Title(String::new()));

        info!("Viewer hidden");
        self.emit(ViewerEvent::Hidden);
    }

    /// Tear the viewer down. Safe to call any number of times.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }

        let requested_fullscreen = self
            .lifecycle
            .session()
            .and_then(|s| s.playback.as_ref())
            .is_some_and(|p| p.requested_fullscreen);
        if requested_fullscreen {
            self.fullscreen.exit_fullscreen();
        }

        self.bound = false;
        self.timers.clear();
        self.gesture.clear();
        self.pending.clear();
        self.events.clear();
        self.target = None;
        self.tooltip = TooltipPhase::Hidden;
        self.lifecycle = Lifecycle::Destroyed;
        info!("Viewer destroyed");
    }

    /// Replace the source images.
    pub fn update(&mut self, images: Vec<SourceImage>) {
        if self.is_destroyed() {
            return;
        }

        let items = build_items(&images, &self.config.url);
        let changed = changed_positions(&self.items, &items);
        // Slides are laid out for the old list.
        if self.is_played() && (!changed.is_empty() || items.len() != self.items.len()) {
            self.stop();
        }
        self.sources = images;
        self.items = items;
        debug!(items = self.items.len(), changed = changed.len(), "Images updated");

        if !self.lifecycle.is_built() {
            self.index = self.index.min(self.items.len().saturating_sub(1));
            return;
        }

        self.init_list();

        if !self.is_visible() {
            self.index = self.index.min(self.items.len().saturating_sub(1));
            let len = self.items.len();
            self.target = self.target.filter(|&target| target < len);
            return;
        }

        if self.items.is_empty() {
            if let Some(session) = self.lifecycle.session_mut() {
                session.stage = ViewStage::Empty;
            }
            self.index = 0;
            self.drop_pending(|usage| !matches!(usage, LoadUse::View(_)));
            self.timers.cancel(TimerKind::LoadFallback);
            self.surface.render(Render::ImageVisible(false));
            self.surface.render(Render::Title(String::new()));
            return;
        }

        let last = self.items.len() - 1;
        let previous = match self.lifecycle.session().map(|s| &s.stage) {
            Some(ViewStage::Viewed { image, .. }) => Some(*image),
            Some(ViewStage::Loading { previous, .. }) => *previous,
            _ => {
                self.index = self.index.min(last);
                self.view(self.index);
                return;
            }
        };

        match changed.iter().position(|&i| i == self.index) {
            Some(position) => {
                let index = self.index.saturating_sub(position + 1).min(last);
                self.drop_pending(|usage| !matches!(usage, LoadUse::View(_)));
                self.timers.cancel(TimerKind::LoadFallback);
                self.index = self.index.min(last);
                if let Some(session) = self.lifecycle.session_mut() {
                    session.stage = ViewStage::Loading {
                        index: self.index,
                        previous,
                    };
                }
                self.view(index);
            }
            None => self.render_list(),
        }
    }

    // ------------------------------------------------------------------
    // Viewing
    // ------------------------------------------------------------------

    /// Switch to image `index`. No-op while playing, for an index out of
    /// range, or for the image already viewed.
    pub fn view(&mut self, index: usize) {
        let Some(session) = self.lifecycle.session() else {
            return;
        };
        if session.is_played() || index >= self.items.len() {
            return;
        }
        if session.is_viewed() && index == self.index {
            return;
        }
        let previous = match &session.stage {
            ViewStage::Viewed { image, .. } => Some(*image),
            ViewStage::Loading { previous, .. } => *previous,
            ViewStage::Empty => None,
        };

        if self.emit(ViewerEvent::View { index }) == EventFlow::Prevent {
            debug!(index, "View prevented by listener");
            return;
        }

        if let Some(session) = self.lifecycle.session_mut() {
            session.stage = ViewStage::Loading { index, previous };
        }
        self.index = index;
        self.surface.render(Render::ImageVisible(false));
        self.render_list();
        self.surface.render(Render::Title(String::new()));

        self.drop_pending(|usage| !matches!(usage, LoadUse::View(_)));
        let url = self.items[index].original_url.clone();
        match self.surface.probe(&url) {
            Probe::Ready(natural) => self.load(natural),
            Probe::Pending => {
                debug!(index, url = %url, "Waiting for natural size");
                self.pending.push(PendingLoad {
                    url,
                    usage: LoadUse::View(index),
                });
                self.timers.schedule(TimerKind::LoadFallback, LOAD_FALLBACK);
            }
        }
    }

    /// Lay out the loading image once its natural size is known.
    pub(super) fn load(&mut self, natural: Size) {
        let Some(ViewStage::Loading { index, previous }) = self.lifecycle.session().map(|s| s.stage.clone()) else {
            return;
        };
        self.timers.cancel(TimerKind::LoadFallback);

        self.surface.render(Render::ImageVisible(true));
        self.surface.render(Render::Image(PaintRequest::placeholder(self.viewport_center())));

        let footer = self.surface.footer_height();
        let fitted = fit_image(
            natural,
            self.viewport,
            footer,
            previous.as_ref(),
            self.config.fit_capabilities(),
        );
        if let Some(session) = self.lifecycle.session_mut() {
            session.stage = ViewStage::Viewed {
                image: fitted.image,
                initial: fitted.initial,
            };
        }

        self.surface.render(Render::ImageTransition(self.config.transition));
        self.surface.render(Render::Image((&fitted.image).into()));

        let alt = self.items.get(index).map(|item| item.alt.clone()).unwrap_or_default();
        let title = format!("{alt} ({} × {})", natural.width, natural.height);
        self.surface.render(Render::Title(title.clone()));

        debug!(index, ratio = fitted.image.ratio, "Image viewed");
        self.emit(ViewerEvent::Viewed {
            index,
            image: fitted.image,
            title,
        });
    }

    pub fn prev(&mut self) {
        if self.editable().is_none() {
            return;
        }
        self.view(self.index.saturating_sub(1));
    }

    pub fn next(&mut self) {
        if self.editable().is_none() {
            return;
        }
        let last = self.items.len().saturating_sub(1);
        self.view((self.index + 1).min(last));
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Move the image by an offset. Non-finite axes are left alone.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let Some((mut image, _)) = self.editable() else {
            return;
        };
        if self.config.movable && transform::translate(&mut image, dx, dy) {
            self.commit_image(image);
        }
    }

    /// Move the image to an absolute position in the viewport.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let Some((mut image, _)) = self.editable() else {
            return;
        };
        if self.config.movable && transform::move_to(&mut image, x, y) {
            self.commit_image(image);
        }
    }

    /// Zoom by a relative step: `0.1` grows by 10%, `-0.1` shrinks by the
    /// inverse.
    pub fn zoom(&mut self, step: f64, with_tooltip: bool) {
        self.zoom_by_origin(step, with_tooltip, ZoomOrigin::Api);
    }

    /// Zoom to an absolute ratio of the natural size.
    pub fn zoom_to(&mut self, ratio: f64, with_tooltip: bool) {
        self.zoom_to_origin(ratio, with_tooltip, ZoomOrigin::Api);
    }

    pub(super) fn zoom_by_origin(&mut self, step: f64, with_tooltip: bool, origin: ZoomOrigin) {
        let Some((image, _)) = self.editable() else {
            return;
        };
        if !step.is_finite() {
            return;
        }
        let target = transform::relative_zoom_target(&image, step);
        self.zoom_to_origin(target, with_tooltip, origin);
    }

    pub(super) fn zoom_to_origin(&mut self, ratio: f64, with_tooltip: bool, origin: ZoomOrigin) {
        let Some((mut image, _)) = self.editable() else {
            return;
        };
        if !ratio.is_finite() {
            return;
        }
        let bypass = origin == ZoomOrigin::Bypass;
        if !bypass && !self.config.zoomable {
            return;
        }

        let mut ratio = ratio.max(0.0);
        if !bypass {
            let bounds = self.config.zoom_bounds();
            ratio = transform::clamp_ratio(ratio, bounds);
            if let ZoomOrigin::Event(_) = origin {
                ratio = transform::clamp_ratio(transform::snap_ratio(ratio), bounds);
            }
        }

        let anchor = match origin {
            ZoomOrigin::Event(point) => Some(point),
            ZoomOrigin::Api | ZoomOrigin::Bypass => None,
        };
        let offset = self.surface.viewport_offset();
        transform::resize_to_ratio(&mut image, ratio, anchor, offset);
        debug!(ratio, "Zoomed");
        self.commit_image(image);

        if with_tooltip {
            self.tooltip();
        }
    }

    /// Rotate by a relative angle in degrees.
    pub fn rotate(&mut self, degrees: f64) {
        let Some((image, _)) = self.editable() else {
            return;
        };
        self.rotate_to(image.rotate.unwrap_or(0.0) + degrees);
    }

    /// Rotate to an absolute angle in degrees. Angles are not wrapped.
    pub fn rotate_to(&mut self, degrees: f64) {
        let Some((mut image, _)) = self.editable() else {
            return;
        };
        if self.config.rotatable && transform::rotate_to(&mut image, degrees) {
            self.commit_image(image);
        }
    }

    /// Set both axis scales. A non-finite axis is left alone.
    pub fn scale(&mut self, scale_x: f64, scale_y: f64) {
        let Some((mut image, _)) = self.editable() else {
            return;
        };
        if self.config.scalable && transform::scale_to(&mut image, scale_x, scale_y) {
            self.commit_image(image);
        }
    }

    pub fn scale_x(&mut self, scale_x: f64) {
        self.scale(scale_x, f64::NAN);
    }

    pub fn scale_y(&mut self, scale_y: f64) {
        self.scale(f64::NAN, scale_y);
    }

    /// Mirror the image horizontally.
    pub fn flip_horizontal(&mut self) {
        if let Some((image, _)) = self.editable() {
            self.scale_x(transform::flipped(image.scale_x));
        }
    }

    /// Mirror the image vertically.
    pub fn flip_vertical(&mut self) {
        if let Some((image, _)) = self.editable() {
            self.scale_y(transform::flipped(image.scale_y));
        }
    }

    /// Switch between natural size and the fitted size.
    pub fn toggle(&mut self) {
        let Some((image, initial)) = self.editable() else {
            return;
        };
        if image.ratio == 1.0 {
            self.zoom_to_origin(initial.ratio, true, ZoomOrigin::Api);
        } else {
            self.zoom_to_origin(1.0, true, ZoomOrigin::Api);
        }
    }

    /// Restore the geometry the image had right after it was laid out.
    pub fn reset(&mut self) {
        if let Some((_, initial)) = self.editable() {
            self.commit_image(initial);
        }
    }

    /// Show the current zoom ratio for a moment.
    pub fn tooltip(&mut self) {
        let Some((image, _)) = self.editable() else {
            return;
        };
        if !self.config.tooltip.is_enabled() {
            return;
        }

        let text = format!("{}%", (image.ratio * 100.0).round());
        if self.tooltip == TooltipPhase::Fading {
            self.surface.render(Render::Tooltip(TooltipState::Hidden));
        }
        self.surface.render(Render::Tooltip(TooltipState::Shown(text)));
        self.tooltip = TooltipPhase::Shown;
        self.timers.schedule(TimerKind::TooltipHide, TOOLTIP_DURATION);
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn play(&mut self) {
        let Some(session) = self.lifecycle.session() else {
            return;
        };
        if session.is_played() || self.items.is_empty() {
            return;
        }
        let fulled = session.fulled;

        let mut slideshow = Slideshow::new(self.items.len(), self.index);
        if self.config.fullscreen && fulled && !self.fullscreen.is_fullscreen_active() {
            self.fullscreen.request_fullscreen();
            slideshow.requested_fullscreen = true;
        }
        let auto = slideshow.auto_advances(self.config.interval);
        if let Some(session) = self.lifecycle.session_mut() {
            session.playback = Some(slideshow);
        }
        info!(index = self.index, interval = self.config.interval, "Slideshow started");

        let urls: Vec<String> = self.items.iter().map(|item| item.original_url.clone()).collect();
        for (index, url) in urls.into_iter().enumerate() {
            match self.surface.probe(&url) {
                Probe::Ready(natural) => self.fit_slide(index, natural),
                Probe::Pending => {
                    self.surface.render(Render::Slide {
                        index,
                        shown: index == self.index,
                        rect: None,
                    });
                    self.pending.push(PendingLoad {
                        url,
                        usage: LoadUse::Slide(index),
                    });
                }
            }
        }

        if auto {
            self.timers.schedule(TimerKind::Slideshow, self.config.slideshow_interval());
        }
    }

    /// Stop the slideshow and view the slide it stopped on.
    pub fn stop(&mut self) {
        let Some(playback) = self.lifecycle.session_mut().and_then(|s| s.playback.take()) else {
            return;
        };

        if self.config.fullscreen && playback.requested_fullscreen {
            self.fullscreen.exit_fullscreen();
        }
        self.timers.cancel(TimerKind::Slideshow);
        self.drop_pending(|usage| !matches!(usage, LoadUse::Slide(_)));
        self.surface.render(Render::SlidesCleared);
        info!(index = playback.current(), "Slideshow stopped");

        if playback.current() != self.index || !self.is_viewed() {
            self.view(playback.current());
        }
    }

    pub(super) fn tick(&mut self) {
        let step = self
            .lifecycle
            .session_mut()
            .and_then(|s| s.playback.as_mut())
            .and_then(|p| p.advance().map(|(hidden, shown)| (hidden, shown, p.slide(hidden), p.slide(shown))));
        let Some((hidden, shown, hidden_slide, shown_slide)) = step else {
            return;
        };

        for (index, slide) in [(hidden, hidden_slide), (shown, shown_slide)] {
            if let Some(slide) = slide {
                self.surface.render(Render::Slide {
                    index,
                    shown: slide.shown,
                    rect: slide.rect,
                });
            }
        }
        debug!(index = shown, "Slideshow advanced");
        self.timers.schedule(TimerKind::Slideshow, self.config.slideshow_interval());
    }

    // ------------------------------------------------------------------
    // Inline fullscreen
    // ------------------------------------------------------------------

    /// Let an inline viewer take over the whole window.
    pub fn full(&mut self) {
        if !self.config.inline {
            return;
        }
        match self.lifecycle.session_mut() {
            Some(session) if !session.is_played() && !session.fulled => session.fulled = true,
            _ => return,
        }
        info!("Entered full mode");

        self.init_container();
        self.init_viewport(true);
        self.refit(true);
    }

    /// Return an inline viewer to its host element.
    pub fn exit(&mut self) {
        if !self.config.inline {
            return;
        }
        match self.lifecycle.session_mut() {
            Some(session) if session.fulled => session.fulled = false,
            _ => return,
        }
        info!("Exited full mode");

        self.init_container();
        self.init_viewport(false);
        self.refit(true);
    }

    /// Re-lay out the frame, the list and the viewed image after the
    /// viewport changed. With `suspend_transition` the change is not
    /// animated.
    pub(super) fn refit(&mut self, suspend_transition: bool) {
        self.render_frame();
        self.render_list();

        let Some(ViewStage::Viewed { image, .. }) = self.lifecycle.session().map(|s| s.stage.clone()) else {
            return;
        };
        let suspend = suspend_transition && self.config.transition;
        if suspend {
            self.surface.render(Render::ImageTransition(false));
        }

        let footer = self.surface.footer_height();
        let fitted = fit_image(
            image.natural_size(),
            self.viewport,
            footer,
            Some(&image),
            self.config.fit_capabilities(),
        );
        if let Some(session) = self.lifecycle.session_mut() {
            session.stage = ViewStage::Viewed {
                image: fitted.image,
                initial: fitted.initial,
            };
        }
        self.surface.render(Render::Image((&fitted.image).into()));

        if suspend {
            self.surface.render(Render::ImageTransition(true));
        }
    }
}
