use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use iris_core::geometry::{image_name_from_url, Size};
use iris_core::layout::{fit_image, FitCapabilities};

#[derive(Args)]
pub struct InfoArgs {
    /// Image files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    pub height: f64,

    /// Footer height reserved below the image
    #[arg(long, default_value = "0")]
    pub footer: f64,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let viewport = Size::new(args.width, args.height);
    let caps = FitCapabilities {
        rotatable: true,
        scalable: true,
    };

    for path in &args.files {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let natural = Size::new(width as f64, height as f64);
        let fitted = fit_image(natural, viewport, args.footer, None, caps);
        let image = fitted.image;
        let rect = image.rect();
        let path_str = path.to_string_lossy();

        println!("File:        {}", image_name_from_url(&path_str));
        println!("Natural:     {}x{}", width, height);
        println!("Viewport:    {}x{}", args.width, args.height);
        println!("Fitted:      {:.1}x{:.1}", rect.width, rect.height);
        println!("Offset:      {:.1}, {:.1}", rect.left, rect.top);
        println!("Ratio:       {:.1}%", image.ratio * 100.0);
        println!();
    }

    Ok(())
}
