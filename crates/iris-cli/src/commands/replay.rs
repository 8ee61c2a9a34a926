use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::Style;
use iris_core::config::ViewerConfig;
use iris_core::events::{EventFlow, EventKind, ViewerEvent};
use iris_core::geometry::{Point, Size};
use iris_core::host::{FullscreenController, HostSurface, NodeKind, Probe, Render};
use iris_core::input::{InputEvent, Key, Modifiers, PointerKind, TransitionTarget, UiCommand, WheelDelta};
use iris_core::source::SourceImage;
use iris_core::viewer::Viewer;
use serde::Deserialize;
use tracing::warn;

use crate::summary::{print_session_summary, SessionSummary};

#[derive(Args)]
pub struct ReplayArgs {
    /// Session script (TOML)
    pub script: PathBuf,

    /// Viewer config file (TOML), overrides the script's [config] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Deserialize)]
struct Script {
    images: Vec<ScriptImage>,
    #[serde(default = "default_window")]
    window: Dims,
    /// Host element size for inline viewers; defaults to the window.
    host: Option<Dims>,
    #[serde(default)]
    footer_height: f64,
    config: Option<ViewerConfig>,
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptImage {
    Path(String),
    Source(SourceImage),
}

impl ScriptImage {
    fn into_source(self) -> SourceImage {
        match self {
            ScriptImage::Path(path) => SourceImage::new(path),
            ScriptImage::Source(source) => source,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct Dims {
    width: f64,
    height: f64,
}

impl From<Dims> for Size {
    fn from(d: Dims) -> Self {
        Size::new(d.width, d.height)
    }
}

fn default_window() -> Dims {
    Dims {
        width: 1280.0,
        height: 800.0,
    }
}

/// One scripted action.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Build,
    Show,
    Start { index: usize },
    Hide,
    View { index: usize },
    Prev,
    Next,
    Play,
    Stop,
    Full,
    Exit,
    Zoom { step: f64 },
    ZoomTo { ratio: f64 },
    Rotate { degrees: f64 },
    Reset,
    Toggle,
    Destroy,
    PointerDown {
        id: u32,
        x: f64,
        y: f64,
        #[serde(default = "default_pointer_kind")]
        kind: PointerKind,
    },
    PointerMove { id: u32, x: f64, y: f64 },
    PointerUp { id: u32 },
    Wheel { delta_y: f64, x: f64, y: f64 },
    Key {
        key: Key,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Command { command: UiCommand },
    Resize { width: f64, height: f64 },
    Advance { ms: u64 },
    TransitionEnd { target: TransitionTarget },
    /// Leave platform fullscreen, as a user pressing the platform's own
    /// exit key would.
    LeaveFullscreen,
}

fn default_pointer_kind() -> PointerKind {
    PointerKind::Mouse
}

/// Host surface backed by image files on disk.
struct FileSurface {
    base_dir: PathBuf,
    window: Size,
    host: Option<Size>,
    footer_height: f64,
    quiet: bool,
    renders: Rc<RefCell<usize>>,
    style: Style,
}

impl HostSurface for FileSurface {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn host_size(&self) -> Size {
        self.host.unwrap_or(self.window)
    }

    fn window_size(&self) -> Size {
        self.window
    }

    fn footer_height(&self) -> f64 {
        self.footer_height
    }

    fn probe(&mut self, url: &str) -> Probe {
        let path = self.base_dir.join(url);
        match image::image_dimensions(&path) {
            Ok((width, height)) => Probe::Ready(Size::new(width as f64, height as f64)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read image size");
                Probe::Pending
            }
        }
    }

    fn render(&mut self, command: Render) {
        *self.renders.borrow_mut() += 1;
        if !self.quiet {
            println!("  {} {:?}", self.style.apply_to("render"), command);
        }
    }
}

/// Fullscreen that always succeeds, until the script leaves it.
#[derive(Default)]
struct ScriptFullscreen {
    active: bool,
}

impl FullscreenController for ScriptFullscreen {
    fn request_fullscreen(&mut self) {
        self.active = true;
    }

    fn exit_fullscreen(&mut self) {
        self.active = false;
    }

    fn is_fullscreen_active(&self) -> bool {
        self.active
    }
}

fn load_script(path: &Path) -> Result<Script> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    toml::from_str(&contents).context("Invalid session script")
}

fn load_config(path: &Path) -> Result<ViewerConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid viewer config")
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let script = load_script(&args.script)?;
    let config = match args.config {
        Some(ref path) => load_config(path)?,
        None => script.config.clone().unwrap_or_default(),
    };

    let base_dir = args
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let renders = Rc::new(RefCell::new(0usize));
    let surface = FileSurface {
        base_dir,
        window: script.window.into(),
        host: script.host.map(Size::from),
        footer_height: script.footer_height,
        quiet: args.quiet,
        renders: Rc::clone(&renders),
        style: Style::new().dim(),
    };

    let images: Vec<SourceImage> = script.images.into_iter().map(ScriptImage::into_source).collect();
    let image_count = images.len();
    let mut viewer = Viewer::new(surface, ScriptFullscreen::default(), images, config)
        .context("Failed to attach viewer")?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let event_style = Style::new().cyan();
    for kind in EventKind::ALL {
        let log = Rc::clone(&events);
        let style = event_style.clone();
        let quiet = args.quiet;
        viewer.subscribe(kind, move |event: &ViewerEvent| {
            if !quiet {
                println!("  {} {:?}", style.apply_to("event "), event);
            }
            log.borrow_mut().push(event.kind());
            EventFlow::Continue
        });
    }

    let step_style = Style::new().bold();
    let steps = script.steps.len();
    for (i, step) in script.steps.into_iter().enumerate() {
        if !args.quiet {
            println!("{} {:?}", step_style.apply_to(format!("[{:>3}]", i + 1)), step);
        }
        apply_step(&mut viewer, step);
    }

    let events = events.borrow();
    let summary = SessionSummary {
        script: &args.script,
        images: image_count,
        items: viewer.len(),
        steps,
        renders: *renders.borrow(),
        events: &events,
        state: viewer.lifecycle().name(),
        index: viewer.index(),
        played: viewer.is_played(),
        image: viewer.image().copied(),
        elapsed: viewer.now(),
    };
    print_session_summary(&summary);

    Ok(())
}

fn apply_step(viewer: &mut Viewer<FileSurface, ScriptFullscreen>, step: Step) {
    match step {
        Step::Build => viewer.build(),
        Step::Show => viewer.show(),
        Step::Start { index } => viewer.start(index),
        Step::Hide => viewer.hide(),
        Step::View { index } => viewer.view(index),
        Step::Prev => viewer.prev(),
        Step::Next => viewer.next(),
        Step::Play => viewer.play(),
        Step::Stop => viewer.stop(),
        Step::Full => viewer.full(),
        Step::Exit => viewer.exit(),
        Step::Zoom { step } => viewer.zoom(step, true),
        Step::ZoomTo { ratio } => viewer.zoom_to(ratio, true),
        Step::Rotate { degrees } => viewer.rotate(degrees),
        Step::Reset => viewer.reset(),
        Step::Toggle => viewer.toggle(),
        Step::Destroy => viewer.destroy(),
        Step::PointerDown { id, x, y, kind } => viewer.handle_input(InputEvent::PointerDown {
            id,
            position: Point::new(x, y),
            kind,
        }),
        Step::PointerMove { id, x, y } => viewer.handle_input(InputEvent::PointerMove {
            id,
            position: Point::new(x, y),
        }),
        Step::PointerUp { id } => viewer.handle_input(InputEvent::PointerUp { id }),
        Step::Wheel { delta_y, x, y } => viewer.handle_input(InputEvent::Wheel {
            delta: WheelDelta::DeltaY(delta_y),
            position: Point::new(x, y),
        }),
        Step::Key { key, ctrl, shift } => viewer.handle_input(InputEvent::KeyDown {
            key,
            modifiers: Modifiers { ctrl, shift },
        }),
        Step::Command { command } => viewer.handle_input(InputEvent::Command(command)),
        Step::Resize { width, height } => {
            viewer.surface_mut().window = Size::new(width, height);
            viewer.handle_input(InputEvent::Resize);
        }
        Step::Advance { ms } => viewer.advance(Duration::from_millis(ms)),
        Step::TransitionEnd { target } => viewer.handle_input(InputEvent::TransitionEnd(target)),
        Step::LeaveFullscreen => viewer.fullscreen_mut().active = false,
    }
}
