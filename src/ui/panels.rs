use eframe::egui::{self, RichText, ScrollArea, Ui};
use meterview::{ParameterScope, TimestampPolicy};

use crate::color::status_color;
use crate::state::{AppState, PeakView, Tab};

// ---------------------------------------------------------------------------
// Left side panel – parameter selection and peak threshold
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Energy data");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            loading_options(ui, state);
            ui.separator();

            let Some(views) = &state.views else {
                ui.label("No dataset loaded.");
                return;
            };

            // ---- Parameter selector ----
            ui.strong("Parameter to visualise");
            let parameters = views.parameters.clone();
            let current = state.selected_parameter.clone().unwrap_or_default();
            let mut chosen = None;
            egui::ComboBox::from_id_salt("parameter")
                .selected_text(&current)
                .width(ui.available_width() - 8.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &parameters {
                        if ui.selectable_label(current == *col, col).clicked() {
                            chosen = Some(col.clone());
                        }
                    }
                });
            if let Some(col) = chosen {
                state.select_parameter(col);
            }
            ui.separator();

            // ---- Peak threshold ----
            ui.strong(format!("Peak threshold ({})", state.config.peak_column));
            let range = match state.views.as_ref().map(|v| &v.peak) {
                Some(PeakView::Ready { range, .. }) => *range,
                _ => None,
            };
            match range {
                Some((lo, hi)) => {
                    let mut threshold = state.threshold;
                    let slider = egui::Slider::new(&mut threshold, lo..=hi.max(lo))
                        .clamping(egui::SliderClamping::Never);
                    if ui.add(slider).changed() {
                        state.set_threshold(threshold);
                    }
                }
                None => {
                    ui.label(RichText::new("Peak column not available").weak());
                }
            }
        });
}

fn loading_options(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Timestamp parsing");
    let mut policy = state.config.timestamp_policy;
    ui.radio_value(&mut policy, TimestampPolicy::Strict, "Strict (reject file)");
    ui.radio_value(&mut policy, TimestampPolicy::Lenient, "Lenient (null bad values)");
    state.set_timestamp_policy(policy);

    ui.add_space(4.0);
    ui.strong("Selectable parameters");
    let mut scope = state.config.parameter_scope;
    ui.radio_value(&mut scope, ParameterScope::NumericOnly, "Numeric columns");
    ui.radio_value(&mut scope, ParameterScope::AllColumns, "All columns");
    state.set_parameter_scope(scope);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// What the top bar asked the app to do this frame.
pub enum TopBarAction {
    None,
    ExportChart,
}

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, export_busy: bool) -> TopBarAction {
    let mut action = TopBarAction::None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.selected_parameter.is_some() && !export_busy;
            if ui
                .add_enabled(can_export, egui::Button::new("Save chart as PNG"))
                .clicked()
            {
                state.active_tab = Tab::Parameter;
                action = TopBarAction::ExportChart;
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(ds)) = (&state.source_name, &state.dataset) {
            ui.label(format!("{name}: {} rows, {} columns", ds.len(), ds.columns.len()));
            ui.separator();
        }

        if let Some(status) = &state.status {
            ui.label(RichText::new(&status.text).color(status_color(status.kind)));
        }
    });
    action
}

/// Tab strip above the central panel.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.label());
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open meter data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
