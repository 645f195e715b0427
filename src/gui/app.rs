//! QuakeScope Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::data::{DataLoader, Dataset};
use crate::geo::{NominatimGeocoder, ResolveMode, ResolveReport, StateResolver};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::Aggregator;
use egui::SidePanel;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Conventional fixed input location, picked up at startup when present.
const DEFAULT_CSV_PATH: &str = "database.csv";
const EXPORT_WIDTH: u32 = 1280;
const EXPORT_HEIGHT: u32 = 720;

/// Pipeline result from background thread
enum PipelineResult {
    Progress(f32, String),
    Complete {
        dataset: Dataset,
        report: ResolveReport,
    },
    Failed(String),
}

/// Main application window.
pub struct QuakeScopeApp {
    dataset: Option<Dataset>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async load + resolve
    pipeline_rx: Option<Receiver<PipelineResult>>,
    is_loading: bool,
}

impl QuakeScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            dataset: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            pipeline_rx: None,
            is_loading: false,
        };

        if Path::new(DEFAULT_CSV_PATH).exists() {
            app.control_panel.settings.csv_path = Some(PathBuf::from(DEFAULT_CSV_PATH));
            app.control_panel.analyze_enabled = true;
            app.control_panel
                .set_progress(0.0, &format!("Found {DEFAULT_CSV_PATH}, ready to analyze"));
        }

        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.csv_path = Some(path);
            self.control_panel.analyze_enabled = true;
            self.control_panel.set_progress(0.0, "Ready to analyze");
        }
    }

    /// Start load + resolve in background thread
    fn start_pipeline(&mut self) {
        if self.is_loading {
            return;
        }
        let Some(path) = self.control_panel.settings.csv_path.clone() else {
            self.control_panel.set_progress(0.0, "No file selected");
            return;
        };
        let mode = self.control_panel.settings.mode;

        self.dataset = None;
        self.chart_viewer.clear();
        self.control_panel.begin_run();
        self.control_panel.set_progress(2.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.pipeline_rx = Some(rx);

        thread::spawn(move || Self::run_pipeline(tx, path, mode));
    }

    /// Run load + resolve (called from background thread)
    fn run_pipeline(tx: Sender<PipelineResult>, path: PathBuf, mode: ResolveMode) {
        let path_str = path.to_string_lossy().to_string();
        let _ = tx.send(PipelineResult::Progress(
            5.0,
            "Reading CSV file...".to_string(),
        ));

        let mut dataset = match DataLoader::load_csv(&path_str) {
            Ok(dataset) => dataset,
            Err(e) => {
                let _ = tx.send(PipelineResult::Failed(e.to_string()));
                return;
            }
        };

        info!("loaded {} records from {path_str}", dataset.len());
        let _ = tx.send(PipelineResult::Progress(
            20.0,
            format!("Loaded {} records, resolving states...", dataset.len()),
        ));

        let report = match mode {
            ResolveMode::RequireColumn => match StateResolver::require_column(&dataset) {
                Ok(report) => report,
                Err(e) => {
                    let _ = tx.send(PipelineResult::Failed(e.to_string()));
                    return;
                }
            },
            ResolveMode::Geocode => {
                let geocoder = match NominatimGeocoder::new() {
                    Ok(geocoder) => geocoder,
                    Err(e) => {
                        let _ = tx.send(PipelineResult::Failed(e.to_string()));
                        return;
                    }
                };

                let progress_tx = tx.clone();
                StateResolver::geocode_missing(&mut dataset, &geocoder, |done, pending| {
                    let progress = 20.0 + 75.0 * done as f32 / pending.max(1) as f32;
                    let _ = progress_tx.send(PipelineResult::Progress(
                        progress,
                        format!("Geocoding {done}/{pending} records..."),
                    ));
                })
            }
        };

        let _ = tx.send(PipelineResult::Complete { dataset, report });
    }

    /// Check for pipeline results
    fn check_pipeline_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.pipeline_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    PipelineResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    PipelineResult::Complete { dataset, report } => {
                        info!(
                            "pipeline complete for {}: {:?}",
                            dataset.source().display(),
                            report
                        );
                        let summary = Self::completion_summary(&dataset, &report);
                        self.control_panel.update_after_load(dataset.max_magnitude());
                        self.chart_viewer.set_dataset(&dataset);
                        self.dataset = Some(dataset);
                        self.rebuild_overall_chart();
                        self.rebuild_filtered_chart();
                        self.control_panel.set_progress(100.0, &summary);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    PipelineResult::Failed(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            // Put receiver back if still needed
            if should_keep_receiver {
                self.pipeline_rx = Some(rx);
            }
        }
    }

    fn completion_summary(dataset: &Dataset, report: &ResolveReport) -> String {
        let mut summary = format!(
            "Complete! {} records ({} from column, {} geocoded)",
            report.total(),
            report.from_column,
            report.geocoded
        );
        if report.lookup_failures > 0 {
            summary.push_str(&format!(", {} lookups failed", report.lookup_failures));
        }
        if dataset.skipped_rows() > 0 {
            summary.push_str(&format!(", {} rows skipped", dataset.skipped_rows()));
        }
        summary
    }

    /// Recompute the unfiltered occurrence chart.
    fn rebuild_overall_chart(&mut self) {
        let Some(dataset) = &self.dataset else { return };

        let table = Aggregator::count_by_state(dataset.records());
        self.chart_viewer.set_overall_chart(ChartData::from_table(
            "Earthquake Occurrences by State",
            &table,
        ));
        self.control_panel.export_enabled = true;
    }

    /// Filter -> aggregate -> chart, re-run on every threshold change.
    fn rebuild_filtered_chart(&mut self) {
        let Some(dataset) = &self.dataset else { return };

        let threshold = self.control_panel.settings.magnitude_threshold;
        let passed = Aggregator::filter_by_magnitude(dataset.records(), threshold);
        let table = Aggregator::count_by_state(passed.iter().copied());
        self.chart_viewer.set_filtered_chart(ChartData::from_table(
            format!("States with Earthquakes of Magnitude >= {threshold:.1}"),
            &table,
        ));
    }

    /// Handle chart export - render the filtered chart to a PNG file
    fn handle_export_chart(&mut self) {
        let Some(chart) = self.chart_viewer.filtered_chart.clone() else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("earthquake_states.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_png(&chart, &path, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Chart exported to {}", path.display()));
                if let Err(e) = open::that(&path) {
                    error!("failed to open exported chart: {e}");
                }
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for QuakeScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_pipeline_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Analyze => {
                            if !self.is_loading {
                                self.start_pipeline();
                            }
                        }
                        ControlPanelAction::ThresholdChanged => self.rebuild_filtered_chart(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
