//! Chart Viewer Widget
//! Central scrollable panel with the dataset preview and occurrence charts.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::{Dataset, QuakeRecord};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 320.0;
/// Rows shown in the dataset overview.
const PREVIEW_ROWS: usize = 5;

/// Scrollable display area: dataset overview on top, then the unfiltered
/// and filtered occurrence charts.
pub struct ChartViewer {
    preview: Vec<QuakeRecord>,
    total_records: usize,
    pub overall_chart: Option<ChartData>,
    pub filtered_chart: Option<ChartData>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            preview: Vec::new(),
            total_records: 0,
            overall_chart: None,
            filtered_chart: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.preview.clear();
        self.total_records = 0;
        self.overall_chart = None;
        self.filtered_chart = None;
    }

    /// Take the preview rows from a freshly resolved dataset.
    pub fn set_dataset(&mut self, dataset: &Dataset) {
        if dataset.is_empty() {
            self.clear();
            return;
        }
        let head = dataset.records().len().min(PREVIEW_ROWS);
        self.preview = dataset.records()[..head].to_vec();
        self.total_records = dataset.len();
    }

    pub fn set_overall_chart(&mut self, chart: ChartData) {
        self.overall_chart = Some(chart);
    }

    pub fn set_filtered_chart(&mut self, chart: ChartData) {
        self.filtered_chart = Some(chart);
    }

    /// Draw the viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.total_records == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.draw_preview_card(ui);
                ui.add_space(CARD_SPACING);

                if let Some(chart) = &self.overall_chart {
                    Self::draw_chart_card(ui, chart);
                    ui.add_space(CARD_SPACING);
                }

                if let Some(chart) = &self.filtered_chart {
                    Self::draw_chart_card(ui, chart);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    /// Dataset overview: the first rows of the loaded file.
    fn draw_preview_card(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Earthquake Dataset Overview")
                        .size(16.0)
                        .strong(),
                );
                ui.add_space(8.0);

                egui::Grid::new("dataset_preview")
                    .striped(true)
                    .min_col_width(90.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Latitude").strong());
                        ui.label(RichText::new("Longitude").strong());
                        ui.label(RichText::new("Magnitude").strong());
                        ui.label(RichText::new("State").strong());
                        ui.end_row();

                        for record in &self.preview {
                            ui.label(format!("{:.3}", record.latitude));
                            ui.label(format!("{:.3}", record.longitude));
                            ui.label(format!("{:.1}", record.magnitude));
                            ui.label(record.state.as_deref().unwrap_or("-"));
                            ui.end_row();
                        }
                    });

                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!(
                        "Showing {} of {} records",
                        self.preview.len(),
                        self.total_records
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });
    }

    /// Draw a single chart card
    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&chart.title).size(16.0).strong());

                if chart.is_empty() {
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new("No earthquakes at or above this magnitude")
                            .size(13.0)
                            .color(Color32::GRAY),
                    );
                } else {
                    ui.label(
                        RichText::new(&chart.subtitle)
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw_bar_chart(ui, chart, CHART_HEIGHT);
                }
            });
    }
}
