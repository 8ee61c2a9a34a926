use std::time::Duration;

/// Lower bound of the zoom ratio, regardless of configuration.
pub const MIN_ZOOM_RATIO: f64 = 0.01;

/// Upper bound of the zoom ratio, regardless of configuration.
pub const MAX_ZOOM_RATIO: f64 = 100.0;

/// Event-driven zoom ratios strictly inside this band snap to natural size.
pub const SNAP_LOWER: f64 = 0.95;
pub const SNAP_UPPER: f64 = 1.05;

/// Fraction of the usable viewport an image may occupy after fitting.
pub const FIT_MARGIN: f64 = 0.9;

/// Zoom step used when the configured `zoom_ratio` is unusable.
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

/// Rotation step of the toolbar rotate buttons, in degrees.
pub const ROTATE_STEP_DEGREES: f64 = 90.0;

/// A natural-size probe that has not resolved by then is shown anyway.
pub const LOAD_FALLBACK: Duration = Duration::from_millis(1000);

/// Wheel events are ignored for this long after each accepted one.
pub const WHEEL_DEBOUNCE: Duration = Duration::from_millis(50);

/// How long the zoom tooltip stays up after its last refresh.
pub const TOOLTIP_DURATION: Duration = Duration::from_millis(1000);

/// Legacy `wheelDelta` units per notch.
pub const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;

/// Width of one navbar thumbnail when the host does not say otherwise.
pub const DEFAULT_THUMBNAIL_WIDTH: f64 = 30.0;

/// Height of one navbar thumbnail when the host does not say otherwise.
pub const DEFAULT_THUMBNAIL_HEIGHT: f64 = 50.0;

/// Gap to the right of each navbar thumbnail (its 1px margin).
pub const THUMBNAIL_GAP: f64 = 1.0;

/// Horizontal travel, in pixels, a swipe needs before it switches images.
pub const SWIPE_THRESHOLD: f64 = 1.0;
