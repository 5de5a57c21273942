use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{Chart, SeriesKind};
use crate::color::slot_color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current view's chart in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.registry.is_empty() {
                ui.heading("Load data files to start  (File → Load files…)");
            } else {
                ui.heading("Check datasets and pick a plot mode");
            }
        });
        return;
    };

    draw_chart(ui, "analysis_plot", &view.chart, state.registry.len());
}

/// Draw any [`Chart`] with egui_plot. `n_slots` sizes the colour palette.
pub fn draw_chart(ui: &mut Ui, id: &str, chart: &Chart, n_slots: usize) {
    let mut plot = Plot::new(id)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if chart.has_legend() {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            let color = slot_color32(series.slot, n_slots, series.translucent);
            let name = series.label.clone().unwrap_or_default();

            match series.kind {
                SeriesKind::Line => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(&name).color(color).width(1.5));
                }
                SeriesKind::Points => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.points(Points::new(points).name(&name).color(color).radius(3.0));
                }
                SeriesKind::Bars { width } => {
                    let bars: Vec<Bar> = series
                        .points
                        .iter()
                        .map(|&[x, count]| Bar::new(x, count).width(width).fill(color))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&name).color(color));
                }
            }
        }
    });
}

/// A single red trace, as used by the acquisition window.
pub fn live_plot(ui: &mut Ui, series: &[[f64; 2]]) {
    Plot::new("live_plot")
        .x_axis_label("Time")
        .y_axis_label("Amplitude")
        .show(ui, |plot_ui| {
            let points: PlotPoints = series.iter().copied().collect();
            plot_ui.line(Line::new(points).color(Color32::RED).width(1.5));
        });
}
