use tracing::{debug, trace};

use crate::consts::{DEFAULT_ZOOM_STEP, ROTATE_STEP_DEGREES, SWIPE_THRESHOLD, WHEEL_DEBOUNCE};
use crate::geometry::Point;
use crate::gesture::{GestureAction, GestureSample, PressContext};
use crate::host::{FullscreenController, HostSurface, Render, TooltipState};
use crate::input::{InputEvent, Key, Modifiers, PointerId, PointerKind, TransitionTarget, UiCommand, WheelDelta};
use crate::slideshow::Slide;
use crate::timer::TimerKind;

use super::methods::ZoomOrigin;
use super::{HideStep, Lifecycle, TooltipPhase, ViewStage, Viewer};

impl<S: HostSurface, F: FullscreenController> Viewer<S, F> {
    /// Feed one input event to the viewer.
    ///
    /// Transition ends are always processed; everything else only while the
    /// viewer listens for input (visible modal viewers, built inline ones).
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::TransitionEnd(target) = event {
            self.transition_end(target);
            return;
        }
        if !self.bound {
            trace!(?event, "Input ignored, viewer not bound");
            return;
        }

        match event {
            InputEvent::PointerDown { id, position, kind } => self.pointer_down(id, position, kind),
            InputEvent::PointerMove { id, position } => self.pointer_move(id, position),
            InputEvent::PointerUp { id } | InputEvent::PointerCancel { id } => self.pointer_up(id),
            InputEvent::Wheel { delta, position } => self.wheel(delta, position),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            InputEvent::Resize => self.resize(),
            InputEvent::Command(command) => self.command(command),
            InputEvent::TransitionEnd(_) => {}
        }
    }

    pub(super) fn fire(&mut self, kind: TimerKind) {
        trace!(?kind, now = ?self.timers.now(), "Timer fired");
        match kind {
            TimerKind::LoadFallback => {
                let loading = matches!(
                    self.lifecycle.session().map(|s| &s.stage),
                    Some(ViewStage::Loading { .. })
                );
                if loading {
                    debug!(index = self.index, "Natural size still unknown, showing image anyway");
                    self.surface.render(Render::ImageVisible(true));
                }
            }
            TimerKind::WheelDebounce => {}
            TimerKind::TooltipHide => {
                if self.tooltip != TooltipPhase::Shown {
                    return;
                }
                if self.config.transition {
                    self.tooltip = TooltipPhase::Fading;
                    self.surface.render(Render::Tooltip(TooltipState::Fading));
                } else {
                    self.tooltip = TooltipPhase::Hidden;
                    self.surface.render(Render::Tooltip(TooltipState::Hidden));
                }
            }
            TimerKind::Slideshow => self.tick(),
        }
    }

    fn transition_end(&mut self, target: TransitionTarget) {
        match target {
            TransitionTarget::Viewer => match self.lifecycle {
                Lifecycle::Showing => self.shown(),
                Lifecycle::Hiding {
                    step: HideStep::FadeOut,
                    ..
                } => self.hidden(),
                _ => trace!(state = self.lifecycle.name(), "Viewer transition end ignored"),
            },
            TransitionTarget::Image => {
                if let Lifecycle::Hiding { step, .. } = &mut self.lifecycle {
                    if *step == HideStep::ZoomOut {
                        *step = HideStep::FadeOut;
                        self.surface.render(Render::ViewerShown(false));
                    }
                }
            }
            TransitionTarget::Tooltip => {
                if self.tooltip == TooltipPhase::Fading {
                    self.tooltip = TooltipPhase::Hidden;
                    self.surface.render(Render::Tooltip(TooltipState::Hidden));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Pointers
    // ------------------------------------------------------------------

    fn pointer_down(&mut self, id: PointerId, position: Point, kind: PointerKind) {
        let Some((image, _)) = self.editable() else {
            return;
        };
        let ctx = PressContext {
            switchable: image.is_switchable(self.viewport),
            movable: self.config.movable,
        };
        self.gesture.press(id, position, kind, ctx);
    }

    fn pointer_move(&mut self, id: PointerId, position: Point) {
        if self.editable().is_none() || !self.gesture.update(id, position) {
            return;
        }

        let action = self.gesture.action();
        if action == GestureAction::Move && self.config.transition && !self.drag_suspended {
            self.drag_suspended = true;
            self.surface.render(Render::ImageTransition(false));
        }

        let Some(sample) = self.gesture.sample() else {
            self.gesture.settle();
            return;
        };
        trace!(?sample, "Gesture sample");

        match sample {
            GestureSample::Move { dx, dy } => {
                self.gesture.settle();
                self.move_by(dx, dy);
            }
            GestureSample::Zoom { ratio, center } => {
                self.gesture.settle();
                let anchor = center.unwrap_or(position);
                self.zoom_by_origin(ratio, false, ZoomOrigin::Event(anchor));
            }
            GestureSample::Switch { dx, dy } => {
                // The offset accumulates until the swipe is decisive.
                if dx.abs() > dy.abs() && dx.abs() > SWIPE_THRESHOLD {
                    self.gesture.mark_switched();
                    self.gesture.settle();
                    if dx > 0.0 {
                        self.prev();
                    } else {
                        self.next();
                    }
                }
            }
        }
    }

    fn pointer_up(&mut self, id: PointerId) {
        if self.gesture.release(id).is_none() {
            return;
        }
        if self.drag_suspended {
            self.drag_suspended = false;
            self.surface.render(Render::ImageTransition(true));
        }
    }

    // ------------------------------------------------------------------
    // Wheel and keyboard
    // ------------------------------------------------------------------

    fn wheel(&mut self, delta: WheelDelta, position: Point) {
        if !self.is_viewed() || self.is_wheeling() {
            return;
        }
        self.timers.schedule(TimerKind::WheelDebounce, WHEEL_DEBOUNCE);

        let step = -delta.direction() * self.config.wheel_step();
        self.zoom_by_origin(step, true, ZoomOrigin::Event(position));
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        if !self.is_fulled() || !self.config.keyboard {
            return;
        }

        match key {
            Key::Escape => {
                if self.is_played() {
                    self.stop();
                } else if self.config.inline {
                    self.exit();
                } else {
                    self.hide();
                }
            }
            Key::Space => self.stop(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::ArrowUp => self.zoom(self.config.zoom_ratio, true),
            Key::ArrowDown => self.zoom(-self.config.zoom_ratio, true),
            Key::Digit0 | Key::Digit1 if modifiers.ctrl || modifiers.shift => self.toggle(),
            Key::Digit0 | Key::Digit1 | Key::Other => {}
        }
    }

    // ------------------------------------------------------------------
    // Controls and window
    // ------------------------------------------------------------------

    fn command(&mut self, command: UiCommand) {
        debug!(?command, "Command");
        match command {
            UiCommand::Mix => {
                if self.is_played() {
                    self.stop();
                } else if self.config.inline {
                    if self.is_fulled() {
                        self.exit();
                    } else {
                        self.full();
                    }
                } else {
                    self.hide();
                }
            }
            UiCommand::View(index) => self.view(index),
            UiCommand::ZoomIn => self.zoom(DEFAULT_ZOOM_STEP, true),
            UiCommand::ZoomOut => self.zoom(-DEFAULT_ZOOM_STEP, true),
            UiCommand::OneToOne => self.toggle(),
            UiCommand::Reset => self.reset(),
            UiCommand::Prev => self.prev(),
            UiCommand::Play => self.play(),
            UiCommand::Next => self.next(),
            UiCommand::RotateLeft => self.rotate(-ROTATE_STEP_DEGREES),
            UiCommand::RotateRight => self.rotate(ROTATE_STEP_DEGREES),
            UiCommand::FlipHorizontal => self.flip_horizontal(),
            UiCommand::FlipVertical => self.flip_vertical(),
            UiCommand::Background => self.stop(),
        }
    }

    /// The window or host element changed size.
    pub fn resize(&mut self) {
        let Some(session) = self.lifecycle.session() else {
            return;
        };
        let fulled = session.fulled;
        let played = session.is_played();

        self.init_container();
        self.init_viewport(fulled);
        self.refit(false);

        if !played {
            return;
        }
        if self.config.fullscreen && fulled && !self.fullscreen.is_fullscreen_active() {
            debug!("Fullscreen left behind our back, stopping playback");
            self.stop();
            return;
        }

        let frame = self.viewport;
        let refitted: Vec<(usize, Slide)> = match self.lifecycle.session_mut().and_then(|s| s.playback.as_mut()) {
            Some(playback) => playback
                .refit(frame)
                .into_iter()
                .filter_map(|i| playback.slide(i).map(|slide| (i, slide)))
                .collect(),
            None => Vec::new(),
        };
        for (index, slide) in refitted {
            self.surface.render(Render::Slide {
                index,
                shown: slide.shown,
                rect: slide.rect,
            });
        }
    }
}
