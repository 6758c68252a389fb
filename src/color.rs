use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::state::StatusKind;

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n).map(|i| hue_color(i as f32 / n as f32 * 360.0)).collect()
}

fn hue_color(hue: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Pair each parameter column with its chart colour. Stable for a given column list.
pub fn series_colors<'a>(columns: impl ExactSizeIterator<Item = &'a str>) -> Vec<(&'a str, Color32)> {
    let palette = generate_palette(columns.len());
    columns.zip(palette).collect()
}

/// Highlight used for points above the peak threshold.
pub const PEAK_COLOR: Color32 = Color32::from_rgb(230, 70, 60);

pub fn status_color(kind: StatusKind) -> Color32 {
    match kind {
        StatusKind::Info => Color32::LIGHT_BLUE,
        StatusKind::Success => Color32::from_rgb(80, 190, 100),
        StatusKind::Warning => Color32::from_rgb(230, 180, 40),
        StatusKind::Error => Color32::RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn series_colors_follow_column_order() {
        let cols = ["Power (kW)", "Voltage"];
        let pairs = series_colors(cols.iter().copied());
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "Power (kW)");
        assert_eq!(pairs[1].1, generate_palette(2)[1]);
    }
}
