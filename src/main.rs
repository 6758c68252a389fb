mod app;
mod color;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use app::MeterViewApp;
use eframe::egui;
use meterview::ViewConfig;
use state::AppState;

/// Command-line arguments: an optional `.json` config and an optional `.csv` to open.
#[derive(Debug, Default, PartialEq)]
struct LaunchArgs {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> LaunchArgs {
    let mut launch = LaunchArgs::default();
    for arg in args {
        let path = PathBuf::from(arg);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => launch.config = Some(path),
            _ => launch.data = Some(path),
        }
    }
    launch
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1));
    let config = match &args.config {
        Some(path) => ViewConfig::from_json_file(path).unwrap_or_else(|e| {
            log::error!("{e:#}; using default configuration");
            ViewConfig::default()
        }),
        None => ViewConfig::default(),
    };

    let mut state = AppState::new(config);
    if let Some(path) = &args.data {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Energy Data Visualization",
        options,
        Box::new(|_cc| Ok(Box::new(MeterViewApp::new(state)))),
    )
}
