use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use meterview::Dataset;

use crate::state::{AppState, PeakView};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Summary statistics (describe-style: one column per numeric column)
// ---------------------------------------------------------------------------

pub fn statistics_table(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.heading("Summary statistics");
    if views.statistics.is_empty() {
        ui.colored_label(Color32::YELLOW, "No numeric columns to summarise.");
        return;
    }

    let rows: Vec<[(&str, String); 8]> = views.statistics.iter().map(|(_, s)| s.table_rows()).collect();

    ui.push_id("statistics_table", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(60.0))
                .columns(Column::auto().at_least(90.0), views.statistics.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("");
                    });
                    for (name, _) in &views.statistics {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for stat in 0..8 {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.strong(rows[0][stat].0);
                            });
                            for column in &rows {
                                row.col(|ui| {
                                    ui.monospace(&column[stat].1);
                                });
                            }
                        });
                    }
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Generic dataset table (preview and peak rows)
// ---------------------------------------------------------------------------

fn dataset_table(ui: &mut Ui, id: &str, dataset: &Dataset) {
    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(80.0), dataset.columns.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for name in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                        let cells = &dataset.rows[row.index()].cells;
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
    });
}

pub fn preview_table(ui: &mut Ui, state: &AppState) {
    let (Some(ds), Some(views)) = (&state.dataset, &state.views) else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.heading("Data preview");
    ui.label(format!(
        "First {} of {} rows, {} columns",
        views.preview.len(),
        ds.len(),
        ds.columns.len()
    ));
    dataset_table(ui, "preview_table", &views.preview);
}

/// Rows of the current peak subset, under the peak chart.
pub fn peak_rows_table(ui: &mut Ui, state: &AppState) {
    let Some(PeakView::Ready { peaks, .. }) = state.views.as_ref().map(|v| &v.peak) else {
        return;
    };
    egui::CollapsingHeader::new(format!("Peak rows ({})", peaks.len()))
        .id_salt("peak_rows")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            dataset_table(ui, "peak_table", peaks);
        });
}
