use std::path::Path;
use std::time::Duration;

use console::Style;
use iris_core::events::EventKind;
use iris_core::layout::ImageGeometry;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    state: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            state: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// What a replayed session ended with.
pub struct SessionSummary<'a> {
    pub script: &'a Path,
    pub images: usize,
    pub items: usize,
    pub steps: usize,
    pub renders: usize,
    pub events: &'a [EventKind],
    pub state: &'static str,
    pub index: usize,
    pub played: bool,
    pub image: Option<ImageGeometry>,
    pub elapsed: Duration,
}

pub fn print_session_summary(summary: &SessionSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Iris Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Script"),
        s.path.apply_to(summary.script.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.value.apply_to(format!("{} ({} usable)", summary.images, summary.items))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Steps"),
        s.value.apply_to(summary.steps)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Renders"),
        s.value.apply_to(summary.renders)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Clock"),
        s.value.apply_to(format!("{} ms", summary.elapsed.as_millis()))
    );
    println!();

    // Events
    println!("  {}", s.header.apply_to("Events"));
    if summary.events.is_empty() {
        println!("    {}", s.disabled.apply_to("none"));
    }
    for kind in EventKind::ALL {
        let count = summary.events.iter().filter(|k| **k == kind).count();
        if count > 0 {
            println!(
                "    {:<12}{}",
                s.label.apply_to(format!("{kind:?}")),
                s.value.apply_to(count)
            );
        }
    }
    println!();

    // Final state
    println!("  {}", s.header.apply_to("Final State"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Lifecycle"),
        s.state.apply_to(summary.state)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Index"),
        s.value.apply_to(summary.index)
    );
    if summary.played {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Slideshow"),
            s.state.apply_to("playing")
        );
    }
    match summary.image {
        Some(ref image) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Size"),
                s.value.apply_to(format!("{:.1} x {:.1}", image.width, image.height))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Offset"),
                s.value.apply_to(format!("{:.1}, {:.1}", image.left, image.top))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Ratio"),
                s.value.apply_to(format!("{:.0}%", image.ratio * 100.0))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Transform"),
                s.value.apply_to(image.transform())
            );
        }
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Image"),
            s.disabled.apply_to("not viewed")
        ),
    }
    println!();
}
