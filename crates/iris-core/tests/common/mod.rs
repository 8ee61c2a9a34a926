#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use iris_core::config::ViewerConfig;
use iris_core::geometry::{Point, Size};
use iris_core::host::{FullscreenController, HostSurface, NodeKind, PaintRequest, Probe, Render};
use iris_core::input::{InputEvent, PointerKind};
use iris_core::source::SourceImage;
use iris_core::viewer::Viewer;

pub const WINDOW: Size = Size {
    width: 1000.0,
    height: 800.0,
};

/// Natural size every test image has unless a test says otherwise. Fitted
/// into `WINDOW` it becomes 900 x 675 at ratio 0.45, placed at (50, 62.5).
pub const NATURAL: Size = Size {
    width: 2000.0,
    height: 1500.0,
};

/// Host surface that records every render command.
pub struct RecordingSurface {
    pub node: NodeKind,
    pub window: Size,
    pub host: Size,
    pub offset: Point,
    pub footer: f64,
    /// Sizes returned synchronously by `probe`.
    pub sizes: HashMap<String, Size>,
    /// URLs whose probe stays pending.
    pub slow: HashSet<String>,
    pub probes: Vec<String>,
    pub renders: Vec<Render>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            node: NodeKind::Element,
            window: WINDOW,
            host: Size::new(600.0, 400.0),
            offset: Point::ORIGIN,
            footer: 0.0,
            sizes: HashMap::new(),
            slow: HashSet::new(),
            probes: Vec::new(),
            renders: Vec::new(),
        }
    }

    /// Last image paint request.
    pub fn last_paint(&self) -> Option<PaintRequest> {
        self.renders.iter().rev().find_map(|r| match r {
            Render::Image(paint) => Some(*paint),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Render) -> bool) -> usize {
        self.renders.iter().filter(|r| pred(r)).count()
    }
}

impl HostSurface for RecordingSurface {
    fn node_kind(&self) -> NodeKind {
        self.node
    }

    fn host_size(&self) -> Size {
        self.host
    }

    fn window_size(&self) -> Size {
        self.window
    }

    fn viewport_offset(&self) -> Point {
        self.offset
    }

    fn footer_height(&self) -> f64 {
        self.footer
    }

    fn probe(&mut self, url: &str) -> Probe {
        self.probes.push(url.to_string());
        if self.slow.contains(url) {
            return Probe::Pending;
        }
        match self.sizes.get(url) {
            Some(size) => Probe::Ready(*size),
            None => Probe::Ready(NATURAL),
        }
    }

    fn render(&mut self, command: Render) {
        self.renders.push(command);
    }
}

/// Fullscreen controller that counts calls. With `honor` off, requests
/// silently fail.
pub struct FakeFullscreen {
    pub active: bool,
    pub honor: bool,
    pub requests: usize,
    pub exits: usize,
}

impl FakeFullscreen {
    pub fn new() -> Self {
        Self {
            active: false,
            honor: true,
            requests: 0,
            exits: 0,
        }
    }
}

impl FullscreenController for FakeFullscreen {
    fn request_fullscreen(&mut self) {
        self.requests += 1;
        if self.honor {
            self.active = true;
        }
    }

    fn exit_fullscreen(&mut self) {
        self.exits += 1;
        self.active = false;
    }

    fn is_fullscreen_active(&self) -> bool {
        self.active
    }
}

pub type TestViewer = Viewer<RecordingSurface, FakeFullscreen>;

/// `n` source images named `img/0.jpg`, `img/1.jpg`, ...
pub fn images(n: usize) -> Vec<SourceImage> {
    (0..n).map(|i| SourceImage::new(format!("img/{i}.jpg"))).collect()
}

/// Default config without animations, so every transition completes
/// synchronously.
pub fn instant_config() -> ViewerConfig {
    ViewerConfig {
        transition: false,
        ..ViewerConfig::default()
    }
}

pub fn viewer_with(n: usize, config: ViewerConfig) -> TestViewer {
    Viewer::new(RecordingSurface::new(), FakeFullscreen::new(), images(n), config).expect("element host")
}

/// Modal viewer, shown and viewing image 0.
pub fn shown_viewer(n: usize) -> TestViewer {
    let mut viewer = viewer_with(n, instant_config());
    viewer.show();
    assert!(viewer.is_viewed(), "viewer should be viewing after show");
    viewer
}

/// Inline viewer, built and viewing image 0.
pub fn inline_viewer(n: usize) -> TestViewer {
    let config = ViewerConfig {
        inline: true,
        ..instant_config()
    };
    let mut viewer = viewer_with(n, config);
    viewer.build();
    viewer
}

pub fn down(viewer: &mut TestViewer, id: u32, x: f64, y: f64, kind: PointerKind) {
    viewer.handle_input(InputEvent::PointerDown {
        id,
        position: Point::new(x, y),
        kind,
    });
}

pub fn move_to(viewer: &mut TestViewer, id: u32, x: f64, y: f64) {
    viewer.handle_input(InputEvent::PointerMove {
        id,
        position: Point::new(x, y),
    });
}

pub fn up(viewer: &mut TestViewer, id: u32) {
    viewer.handle_input(InputEvent::PointerUp { id });
}
