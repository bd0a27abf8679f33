use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use wheel_engine::config::Config;
use wheel_engine::BallFrame;

pub mod raster;
pub mod svg;

pub use raster::WheelRenderer;
pub use svg::render_svg;

/// Width and height of a snapshot: the rim plus padding on each side.
pub fn canvas_size(config: &Config) -> u32 {
    let extent = (config.wheel.rim_radius() + config.render.padding.max(0.0)) * 2.0;
    extent.ceil().max(1.0) as u32
}

/// Write a snapshot, picking the format from the file extension (`.png` or `.svg`).
pub fn write_snapshot(path: &Path, config: &Config, ball: &BallFrame) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => {
            let mut renderer = WheelRenderer::new(config)?;
            renderer.render(ball);
            renderer.save_png(path)?;
        }
        Some("svg") => {
            fs::write(path, render_svg(config, ball))
                .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
        }
        _ => bail!("Unsupported snapshot format for {}, use .png or .svg", path.display()),
    }

    info!("Wrote snapshot to {}", path.display());
    Ok(())
}
