use eframe::egui;

use crate::export::{export_file_name, ChartExport};
use crate::state::{AppState, Status, StatusKind, Tab};
use crate::ui::panels::{self, TopBarAction};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MeterViewApp {
    pub state: AppState,
    export: ChartExport,
}

impl MeterViewApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            export: ChartExport::default(),
        }
    }

    fn start_export(&mut self, ctx: &egui::Context) {
        let Some(parameter) = &self.state.selected_parameter else {
            return;
        };
        let target = self.state.config.export_dir.join(export_file_name(parameter));
        log::info!("Exporting chart to {}", target.display());
        self.export.request(ctx, target);
    }

    fn finish_export(&mut self, ctx: &egui::Context) {
        let Some(result) = self.export.poll(ctx) else {
            return;
        };
        self.state.status = Some(match result {
            Ok(path) => Status {
                kind: StatusKind::Success,
                text: format!("Chart saved to {}", path.display()),
            },
            Err(e) => {
                log::error!("Chart export failed: {e:#}");
                Status {
                    kind: StatusKind::Error,
                    text: format!("Error: {e:#}"),
                }
            }
        });
    }
}

impl eframe::App for MeterViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.finish_export(ctx);

        // ---- Top panel: menu bar ----
        let action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &mut self.state, self.export.is_pending()))
            .inner;

        // ---- Left side panel: parameter and threshold ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            self.export.chart_rect = None;
            match self.state.active_tab {
                Tab::Parameter => {
                    self.export.chart_rect = plot::parameter_chart(ui, &self.state);
                }
                Tab::AllParameters => plot::all_parameters(ui, &self.state),
                Tab::Statistics => table::statistics_table(ui, &self.state),
                Tab::PeakDetection => {
                    plot::peak_chart(ui, &self.state);
                    table::peak_rows_table(ui, &self.state);
                }
                Tab::Preview => table::preview_table(ui, &self.state),
            }
        });

        if let TopBarAction::ExportChart = action {
            self.start_export(ctx);
        }
    }
}
