//! Live pointer set and gesture classification.

use std::collections::BTreeMap;

use tracing::trace;

use crate::geometry::{max_zoom_ratio, pointers_center, Point, PointerRecord};
use crate::input::{PointerId, PointerKind};

/// Pointers currently pressed, ordered by id. The first entry is the
/// primary pointer.
pub type PointerMap = BTreeMap<PointerId, PointerRecord>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureAction {
    #[default]
    None,
    /// Pan the image.
    Move,
    /// Pinch zoom.
    Zoom,
    /// One-finger swipe that may switch to the previous or next image.
    Switch,
    /// The swipe already switched; ignored until release.
    Switched,
}

/// What the current pointer sample asks the transform engine to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSample {
    Move { dx: f64, dy: f64 },
    Zoom { ratio: f64, center: Option<Point> },
    Switch { dx: f64, dy: f64 },
}

/// Classification inputs that depend on the viewer's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressContext {
    /// The image lies entirely inside the viewport.
    pub switchable: bool,
    pub movable: bool,
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    pointers: PointerMap,
    action: GestureAction,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> GestureAction {
        self.action
    }

    pub fn pointers(&self) -> &PointerMap {
        &self.pointers
    }

    /// Record a press and classify the gesture.
    ///
    /// More than one pointer always means zoom, whatever the first pointer
    /// started as.
    pub fn press(&mut self, id: PointerId, position: Point, kind: PointerKind, ctx: PressContext) -> GestureAction {
        self.pointers.insert(id, PointerRecord::at(position));

        self.action = if self.pointers.len() > 1 {
            GestureAction::Zoom
        } else if kind == PointerKind::Touch && ctx.switchable {
            GestureAction::Switch
        } else if ctx.movable {
            GestureAction::Move
        } else {
            GestureAction::None
        };

        trace!(id, pointers = self.pointers.len(), action = ?self.action, "pointer down");
        self.action
    }

    /// Update the end point of a tracked pointer. Returns `false` for a
    /// pointer that was never pressed.
    pub fn update(&mut self, id: PointerId, position: Point) -> bool {
        match self.pointers.get_mut(&id) {
            Some(record) => {
                record.end = position;
                true
            }
            None => false,
        }
    }

    /// Interpret the pointers under the current action.
    pub fn sample(&self) -> Option<GestureSample> {
        match self.action {
            GestureAction::None | GestureAction::Switched => None,
            GestureAction::Move => self.primary().map(|p| {
                let (dx, dy) = p.offset();
                GestureSample::Move { dx, dy }
            }),
            GestureAction::Switch => self.primary().map(|p| {
                let (dx, dy) = p.offset();
                GestureSample::Switch { dx, dy }
            }),
            GestureAction::Zoom => {
                let records: Vec<PointerRecord> = self.pointers.values().copied().collect();
                max_zoom_ratio(&records).map(|ratio| GestureSample::Zoom {
                    ratio,
                    center: pointers_center(&records),
                })
            }
        }
    }

    /// Make the next sample relative to this one.
    pub fn settle(&mut self) {
        for record in self.pointers.values_mut() {
            record.start = record.end;
        }
    }

    pub fn mark_switched(&mut self) {
        self.action = GestureAction::Switched;
    }

    /// Forget a released pointer. Returns the action the gesture had, or
    /// `None` if the pointer was unknown.
    pub fn release(&mut self, id: PointerId) -> Option<GestureAction> {
        self.pointers.remove(&id)?;
        let ended = std::mem::take(&mut self.action);
        trace!(id, action = ?ended, "pointer up");
        Some(ended)
    }

    /// Centroid of the pressed pointers' start points.
    pub fn center(&self) -> Option<Point> {
        pointers_center(self.pointers.values())
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
        self.action = GestureAction::None;
    }

    fn primary(&self) -> Option<&PointerRecord> {
        self.pointers.values().next()
    }
}
