//! Input events a host feeds into the viewer.

use serde::{Deserialize, Serialize};

use crate::consts::WHEEL_DELTA_PER_NOTCH;
use crate::geometry::Point;

/// Identifier of one pointer (mouse, finger or pen) for its press lifetime.
pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Raw wheel delta as the platform reported it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDelta {
    /// Standard `deltaY`: positive scrolls down.
    DeltaY(f64),
    /// Legacy `wheelDelta`: positive scrolls up, 120 units per notch.
    WheelDelta(f64),
    /// Legacy `detail`: positive scrolls down.
    Detail(f64),
}

impl WheelDelta {
    /// Normalized scroll direction: positive zooms out, negative zooms in.
    ///
    /// A zero reading counts as one notch down.
    pub fn direction(&self) -> f64 {
        match *self {
            WheelDelta::DeltaY(d) if d != 0.0 => d.signum(),
            WheelDelta::WheelDelta(d) if d != 0.0 => -d / WHEEL_DELTA_PER_NOTCH,
            WheelDelta::Detail(d) if d != 0.0 => d.signum(),
            _ => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Space,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Digit0,
    Digit1,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// Toolbar, navbar and footer controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiCommand {
    /// The close/fullscreen button: stop playback, toggle inline fullscreen,
    /// or hide a modal viewer.
    Mix,
    /// A navbar thumbnail.
    View(usize),
    ZoomIn,
    ZoomOut,
    OneToOne,
    Reset,
    Prev,
    Play,
    Next,
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
    /// A click anywhere that is not a control.
    Background,
}

/// Which animated element finished its transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTarget {
    Viewer,
    Image,
    Tooltip,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        id: PointerId,
        position: Point,
        kind: PointerKind,
    },
    PointerMove {
        id: PointerId,
        position: Point,
    },
    PointerUp {
        id: PointerId,
    },
    PointerCancel {
        id: PointerId,
    },
    Wheel {
        delta: WheelDelta,
        position: Point,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    Resize,
    Command(UiCommand),
    TransitionEnd(TransitionTarget),
}
