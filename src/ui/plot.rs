use chrono::DateTime;
use eframe::egui::{Color32, Rect, ScrollArea, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use meterview::data::series::{plot_points, SeriesPoint};

use crate::color::{series_colors, PEAK_COLOR};
use crate::state::{AppState, PeakView};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Axis label for an x value in epoch seconds.
fn format_time(x: f64) -> String {
    DateTime::from_timestamp(x as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Time x-axis, zoom and hover labels shared by every chart.
fn time_plot<'a>(plot: Plot<'a>, y_label: &str) -> Plot<'a> {
    plot.x_axis_label("Timestamp")
        .y_axis_label(y_label.to_string())
        .x_axis_formatter(|mark, _range| format_time(mark.value))
        .label_formatter(|name, p| {
            if name.is_empty() {
                format!("{}\n{:.3}", format_time(p.x), p.y)
            } else {
                format!("{name}\n{}\n{:.3}", format_time(p.x), p.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

fn line(series: &[SeriesPoint]) -> Line<'_> {
    Line::new(PlotPoints::from(plot_points(series)))
}

fn no_data(ui: &mut Ui, state: &AppState) -> bool {
    match &state.views {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to continue  (File → Open…)");
            });
            true
        }
        Some(views) => {
            if let Some(msg) = &views.plot_error {
                ui.colored_label(Color32::YELLOW, msg);
                return true;
            }
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Selected parameter chart
// ---------------------------------------------------------------------------

/// Render the chart for the selected parameter. Returns its screen rect for export.
pub fn parameter_chart(ui: &mut Ui, state: &AppState) -> Option<Rect> {
    if no_data(ui, state) {
        return None;
    }
    let views = state.views.as_ref()?;
    let parameter = state.selected_parameter.as_deref()?;

    ui.heading(format!("{parameter} vs Time"));
    let points = plot_points(&views.selected_series);
    let gaps = views.selected_series.len() - points.len();
    if gaps > 0 {
        ui.label(format!("{gaps} rows without a timestamp or value are not drawn"));
    }

    let response = time_plot(Plot::new("parameter_plot"), parameter).show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .name(parameter)
                .color(Color32::LIGHT_BLUE)
                .width(1.5),
        );
        plot_ui.points(
            Points::new(PlotPoints::from(points))
                .color(Color32::LIGHT_BLUE)
                .radius(2.5),
        );
    });
    Some(response.response.rect)
}

// ---------------------------------------------------------------------------
// All parameters: aggregate chart plus one chart per column
// ---------------------------------------------------------------------------

pub fn all_parameters(ui: &mut Ui, state: &AppState) {
    if no_data(ui, state) {
        return;
    }
    let Some(views) = &state.views else {
        return;
    };
    let colors = series_colors(views.all_series.iter().map(|(c, _)| c.as_str()));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("All parameters");
            time_plot(Plot::new("aggregate_plot"), "Value")
                .legend(Legend::default())
                .height(320.0)
                .show(ui, |plot_ui| {
                    for ((name, series), (_, color)) in views.all_series.iter().zip(&colors) {
                        plot_ui.line(line(series).name(name).color(*color).width(1.5));
                    }
                });

            for ((name, series), (_, color)) in views.all_series.iter().zip(&colors) {
                ui.separator();
                ui.strong(format!("{name} vs Time"));
                time_plot(Plot::new(format!("plot_{name}")), name)
                    .height(200.0)
                    .show(ui, |plot_ui| {
                        plot_ui.line(line(series).name(name).color(*color).width(1.5));
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Peak detection
// ---------------------------------------------------------------------------

pub fn peak_chart(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        no_data(ui, state);
        return;
    };
    match &views.peak {
        PeakView::Unavailable(msg) => {
            ui.colored_label(Color32::YELLOW, format!("⚠ {msg}"));
        }
        PeakView::Ready {
            column,
            series,
            peaks,
            peak_series,
            ..
        } => {
            ui.heading(format!("Peaks in {column}"));
            ui.label(format!(
                "{} of {} rows above {:.3}",
                peaks.len(),
                series.len(),
                state.threshold
            ));
            let threshold = state.threshold;
            let x_span = plot_points(series)
                .iter()
                .map(|p| p[0])
                .fold(None, |acc: Option<(f64, f64)>, x| match acc {
                    None => Some((x, x)),
                    Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
                });

            time_plot(Plot::new("peak_plot"), column)
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(line(series).name(column).color(Color32::LIGHT_BLUE));
                    plot_ui.points(
                        Points::new(PlotPoints::from(plot_points(peak_series)))
                            .name("Peaks")
                            .color(PEAK_COLOR)
                            .radius(4.0),
                    );
                    if let Some((lo, hi)) = x_span {
                        plot_ui.line(
                            Line::new(PlotPoints::from(vec![[lo, threshold], [hi, threshold]]))
                                .name("Threshold")
                                .color(Color32::GRAY)
                                .style(egui_plot::LineStyle::dashed_dense()),
                        );
                    }
                });
        }
    }
}
