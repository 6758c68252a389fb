use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use eframe::egui::{self, ColorImage, Rect};

// ---------------------------------------------------------------------------
// PNG export of the selected chart
// ---------------------------------------------------------------------------

/// Tracks where the exportable chart was drawn and a pending screenshot request.
#[derive(Default)]
pub struct ChartExport {
    /// Screen rect of the selected-parameter chart in the last frame.
    pub chart_rect: Option<Rect>,
    pending: Option<PathBuf>,
}

impl ChartExport {
    /// Ask the viewport for a screenshot; the chart is cropped out when it arrives.
    pub fn request(&mut self, ctx: &egui::Context, target: PathBuf) {
        self.pending = Some(target);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a screenshot event, if one arrived this frame.
    /// Returns the written path on success.
    pub fn poll(&mut self, ctx: &egui::Context) -> Option<Result<PathBuf>> {
        let image = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        })?;
        let target = self.pending.take()?;
        let result = match self.chart_rect {
            Some(rect) => save_region(&image, rect, ctx.pixels_per_point(), &target)
                .map(|()| target),
            None => Err(anyhow::anyhow!("no chart is visible to export")),
        };
        Some(result)
    }
}

/// File name for a chart export: the column name reduced to safe characters.
pub fn export_file_name(column: &str) -> String {
    let mut stem: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    while stem.contains("__") {
        stem = stem.replace("__", "_");
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "chart.png".to_string()
    } else {
        format!("{stem}_vs_time.png")
    }
}

/// Crop `rect` (in points) out of a screenshot and write it as PNG.
pub fn save_region(image: &ColorImage, rect: Rect, pixels_per_point: f32, path: &Path) -> Result<()> {
    let region = image.region(&rect, Some(pixels_per_point));
    save_png(&region, path)
}

pub fn save_png(image: &ColorImage, path: &Path) -> Result<()> {
    let [w, h] = image.size;
    if w == 0 || h == 0 {
        bail!("chart area is empty");
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    image::save_buffer(
        path,
        image.as_raw(),
        w as u32,
        h as u32,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("writing {}", path.display()))
}
