//! Chart Plotter Module
//! Interactive bar charts of per-state occurrence counts using egui_plot.

use crate::stats::FrequencyTable;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Color palette for bars
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
];

/// Display-ready chart content for one frequency table.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub subtitle: String,
    /// (state, count) ordered by descending count.
    pub bars: Vec<(String, usize)>,
}

impl ChartData {
    pub fn from_table(title: impl Into<String>, table: &FrequencyTable) -> Self {
        Self {
            title: title.into(),
            subtitle: format!("{} earthquakes · {} states", table.total(), table.len()),
            bars: table.sorted_by_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Creates interactive visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a bar.
    pub fn bar_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a bar chart of occurrence counts.
    /// X-axis: states, Y-axis: number of earthquakes.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart_data: &ChartData, height: f32) {
        let x_labels: Vec<String> = chart_data.bars.iter().map(|(state, _)| state.clone()).collect();

        let bars: Vec<Bar> = chart_data
            .bars
            .iter()
            .enumerate()
            .map(|(i, (state, count))| {
                Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .name(state)
                    .fill(Self::bar_color(i))
            })
            .collect();

        Plot::new(format!("bars_{}", chart_data.title))
            .height(height)
            .allow_scroll(false)
            .x_axis_label("State")
            .y_axis_label("Number of Earthquakes")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() && (mark.value - idx as f64).abs() < 1e-6 {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::QuakeRecord;
    use crate::stats::Aggregator;

    #[test]
    fn chart_bars_follow_descending_counts() {
        let records = vec![
            QuakeRecord::with_state(34.05, -118.24, 4.2, "CA"),
            QuakeRecord::with_state(34.05, -118.24, 4.2, "CA"),
            QuakeRecord::with_state(31.97, -99.90, 3.3, "TX"),
        ];
        let table = Aggregator::count_by_state(&records);
        let chart = ChartData::from_table("Occurrences", &table);

        assert_eq!(
            chart.bars,
            vec![("CA".to_string(), 2), ("TX".to_string(), 1)]
        );
        assert_eq!(chart.subtitle, "3 earthquakes · 2 states");
    }

    #[test]
    fn empty_table_yields_empty_chart() {
        let records: Vec<QuakeRecord> = Vec::new();
        let table = Aggregator::count_by_state(&records);
        let chart = ChartData::from_table("Occurrences", &table);
        assert!(chart.is_empty());
    }
}
