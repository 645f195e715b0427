//! Static Chart Renderer
//! Renders a frequency bar chart to a PNG file with plotters, for export.

use crate::charts::ChartData;
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use std::path::Path;

// Export palette, mirrors the interactive chart colors (RGB).
const BAR_COLORS: [RGBColor; 10] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(121, 85, 72),
];

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the bar chart to a PNG file at the given size.
    pub fn render_png(chart_data: &ChartData, path: &Path, width: u32, height: u32) -> Result<()> {
        if chart_data.is_empty() {
            return Err(anyhow!("No chart data to render"));
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = chart_data.bars.len();
        let max_count = chart_data
            .bars
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(1);
        let y_max = (max_count as f64 * 1.1).ceil().max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(&chart_data.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        let labels: Vec<String> = chart_data.bars.iter().map(|(state, _)| state.clone()).collect();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 0.3 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .x_desc("State")
            .y_desc("Number of Earthquakes")
            .draw()?;

        chart.draw_series(chart_data.bars.iter().enumerate().map(|(i, (_, count))| {
            let color = BAR_COLORS[i % BAR_COLORS.len()];
            Rectangle::new(
                [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, *count as f64)],
                color.filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}
