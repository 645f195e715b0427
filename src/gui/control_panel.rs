//! Control Panel Widget
//! Left side panel with all input controls and settings.

use crate::geo::ResolveMode;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Initial magnitude threshold for the filter slider.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// User settings for the dashboard
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub mode: ResolveMode,
    pub magnitude_threshold: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            mode: ResolveMode::default(),
            magnitude_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Left side control panel with file selection and processing controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub slider_max: f64,
    pub analyze_enabled: bool,
    pub filter_enabled: bool,
    pub export_enabled: bool,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            slider_max: 10.0,
            analyze_enabled: false,
            filter_enabled: false,
            export_enabled: false,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the slider to the loaded data and enable filtering.
    pub fn update_after_load(&mut self, max_magnitude: f64) {
        self.slider_max = max_magnitude.max(DEFAULT_THRESHOLD);
        if self.settings.magnitude_threshold > self.slider_max {
            self.settings.magnitude_threshold = self.slider_max;
        }
        self.filter_enabled = true;
    }

    /// Disable data-dependent controls while a run is in flight.
    pub fn begin_run(&mut self) {
        self.filter_enabled = false;
        self.export_enabled = false;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 QuakeScope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Earthquake Likelihood by State")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== State Resolution Section =====
        ui.label(RichText::new("⚙ State Resolution").size(14.0).strong());
        ui.add_space(5.0);

        ui.radio_value(
            &mut self.settings.mode,
            ResolveMode::RequireColumn,
            "Use State column",
        );
        ui.radio_value(
            &mut self.settings.mode,
            ResolveMode::Geocode,
            "Reverse geocode coordinates",
        );
        ui.label(
            RichText::new(match self.settings.mode {
                ResolveMode::RequireColumn => "Fails if any record lacks a state value",
                ResolveMode::Geocode => "Looks up missing states one record at a time",
            })
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.analyze_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Load & Analyze").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Analyze;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Magnitude Filter Section =====
        ui.label(RichText::new("🎚 Magnitude Filter").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(self.filter_enabled, |ui| {
            let slider = egui::Slider::new(
                &mut self.settings.magnitude_threshold,
                0.0..=self.slider_max,
            )
            .text("min magnitude")
            .fixed_decimals(1);
            if ui.add(slider).changed() {
                action = ControlPanelAction::ThresholdChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Chart").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Analyze,
    ThresholdChanged,
    ExportChart,
}
