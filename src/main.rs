//! QuakeScope - Earthquake CSV Analysis & Interactive State Dashboard
//!
//! Loads a CSV of earthquake records, resolves a US state for every record
//! (from the State column or by reverse geocoding), and charts occurrence
//! counts per state with an interactive magnitude filter.

mod charts;
mod data;
mod geo;
mod gui;
mod stats;

use eframe::egui;
use gui::QuakeScopeApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("QuakeScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "QuakeScope",
        options,
        Box::new(|cc| Ok(Box::new(QuakeScopeApp::new(cc)))),
    )
}
