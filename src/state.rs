use std::path::Path;

use anyhow::{Context, Result};
use meterview::data::filter::{default_threshold, filter_above_threshold, threshold_range};
use meterview::data::loader::load_csv_bytes;
use meterview::data::series::{series_for, SeriesPoint};
use meterview::data::stats::{summary_statistics, ColumnStats};
use meterview::{Dataset, ParameterScope, TimestampPolicy, ViewConfig, ViewError};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Parameter,
    AllParameters,
    Statistics,
    PeakDetection,
    Preview,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Parameter,
        Tab::AllParameters,
        Tab::Statistics,
        Tab::PeakDetection,
        Tab::Preview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Parameter => "Selected parameter",
            Tab::AllParameters => "All parameters",
            Tab::Statistics => "Summary statistics",
            Tab::PeakDetection => "Peak detection",
            Tab::Preview => "Data preview",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views, rebuilt from the dataset on every input change
// ---------------------------------------------------------------------------

/// Peak-detection tab content.
#[derive(Debug, Clone)]
pub enum PeakView {
    Ready {
        column: String,
        /// Observed range of the peak column, for the slider.
        range: Option<(f64, f64)>,
        series: Vec<SeriesPoint>,
        peaks: Dataset,
        peak_series: Vec<SeriesPoint>,
    },
    /// The peak column is missing or not numeric; other tabs still work.
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct DerivedViews {
    pub parameters: Vec<String>,
    /// Set when nothing can be charted; the preview and statistics still render.
    pub plot_error: Option<String>,
    pub selected_series: Vec<SeriesPoint>,
    pub all_series: Vec<(String, Vec<SeriesPoint>)>,
    pub statistics: Vec<(String, ColumnStats)>,
    pub peak: PeakView,
    pub preview: Dataset,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Name and bytes of the last upload, kept so a policy change can re-parse.
    pub source_name: Option<String>,
    source_bytes: Option<Vec<u8>>,

    pub selected_parameter: Option<String>,
    pub threshold: f64,

    pub views: Option<DerivedViews>,
    pub active_tab: Tab,
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            threshold: config.default_threshold,
            config,
            dataset: None,
            source_name: None,
            source_bytes: None,
            selected_parameter: None,
            views: None,
            active_tab: Tab::default(),
            status: Some(Status::new(
                StatusKind::Info,
                "Open a CSV file to continue (File → Open…)",
            )),
        }
    }

    /// Read a CSV from disk and ingest it.
    pub fn load_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match read_upload(path) {
            Ok(bytes) => self.load_bytes(name, bytes),
            Err(e) => self.fail(&e),
        }
    }

    /// Ingest an upload. A failed load discards the previous dataset.
    pub fn load_bytes(&mut self, name: String, bytes: Vec<u8>) {
        self.source_name = Some(name);
        self.source_bytes = Some(bytes);
        self.reload();
    }

    /// Re-parse the current upload with the current config.
    pub fn reload(&mut self) {
        let Some(bytes) = &self.source_bytes else {
            return;
        };
        let name = self.source_name.clone().unwrap_or_default();

        match load_csv_bytes(bytes, &self.config) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {name}: {} rows with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                let status = if dataset.coerced_timestamps > 0 {
                    Status::new(
                        StatusKind::Warning,
                        format!(
                            "{name} loaded; {} unparseable '{}' values set to null",
                            dataset.coerced_timestamps, self.config.timestamp_column
                        ),
                    )
                } else {
                    Status::new(StatusKind::Success, format!("{name} loaded successfully"))
                };
                self.set_dataset(dataset);
                self.status = Some(status);
            }
            Err(e) => {
                let err = anyhow::Error::new(e).context(format!("loading {name}"));
                self.fail(&err);
            }
        }
    }

    fn fail(&mut self, err: &anyhow::Error) {
        log::error!("Failed to load file: {err:#}");
        self.dataset = None;
        self.views = None;
        self.selected_parameter = None;
        self.status = Some(Status::new(StatusKind::Error, format!("Error: {err:#}")));
    }

    /// Install a freshly loaded dataset and derive every view from it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.threshold = match default_threshold(
            &dataset,
            &self.config.peak_column,
            self.config.default_threshold,
        ) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Peak detection unavailable: {e}");
                self.config.default_threshold
            }
        };
        self.dataset = Some(dataset);
        self.rebuild_views();
    }

    pub fn select_parameter(&mut self, column: String) {
        self.selected_parameter = Some(column);
        self.rebuild_views();
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
        self.rebuild_views();
    }

    pub fn set_timestamp_policy(&mut self, policy: TimestampPolicy) {
        if self.config.timestamp_policy != policy {
            self.config.timestamp_policy = policy;
            self.reload();
        }
    }

    pub fn set_parameter_scope(&mut self, scope: ParameterScope) {
        if self.config.parameter_scope != scope {
            self.config.parameter_scope = scope;
            self.rebuild_views();
        }
    }

    /// Recompute every derived view from scratch.
    pub fn rebuild_views(&mut self) {
        let Some(ds) = &self.dataset else {
            self.views = None;
            return;
        };
        let scope = self.config.parameter_scope;
        let parameters = ds.parameter_columns(scope);

        let plot_error = parameters
            .is_empty()
            .then(|| ViewError::NoNumericColumns.to_string());

        if !self
            .selected_parameter
            .as_ref()
            .is_some_and(|p| parameters.contains(p))
        {
            self.selected_parameter = parameters.first().cloned();
        }

        let all_series: Vec<(String, Vec<SeriesPoint>)> = parameters
            .iter()
            .filter_map(|col| match series_for(ds, col, scope) {
                Ok(series) => Some((col.clone(), series)),
                Err(e) => {
                    log::warn!("Skipping {col}: {e}");
                    None
                }
            })
            .collect();

        let selected_series = self
            .selected_parameter
            .as_ref()
            .and_then(|p| all_series.iter().find(|(c, _)| c == p))
            .map(|(_, s)| s.clone())
            .unwrap_or_default();

        self.views = Some(DerivedViews {
            plot_error,
            selected_series,
            all_series,
            statistics: summary_statistics(ds),
            peak: peak_view(ds, &self.config.peak_column, self.threshold),
            preview: ds.head(self.config.preview_rows),
            parameters,
        });
    }
}

fn read_upload(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn peak_view(ds: &Dataset, column: &str, threshold: f64) -> PeakView {
    let build = || -> Result<PeakView, ViewError> {
        let peaks = filter_above_threshold(ds, column, threshold)?;
        Ok(PeakView::Ready {
            column: column.to_string(),
            range: threshold_range(ds, column)?,
            series: series_for(ds, column, ParameterScope::NumericOnly)?,
            peak_series: series_for(&peaks, column, ParameterScope::NumericOnly)
                .unwrap_or_default(),
            peaks,
        })
    };
    build().unwrap_or_else(|e| PeakView::Unavailable(e.to_string()))
}
