use std::fmt;

use crate::analysis::{magnitude_spectrum, Histogram, LinearFit, Summary};
use crate::chart::{Chart, Series, SeriesKind};
use crate::data::model::Registry;
use crate::data::selection::{resolve, Selected, Selection};

/// Fixed bin count for histogram mode.
pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// PlotMode
// ---------------------------------------------------------------------------

/// How the selected datasets are drawn.
///
/// Closed set: a mode the pipeline cannot draw is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlotMode {
    /// Nothing chosen yet; rendering is a no-op.
    #[default]
    None,
    Line,
    Histogram,
    Spectrum,
    Regression,
}

impl PlotMode {
    /// Every mode, in combo-box order.
    pub const ALL: [PlotMode; 5] = [
        PlotMode::None,
        PlotMode::Line,
        PlotMode::Histogram,
        PlotMode::Spectrum,
        PlotMode::Regression,
    ];

    /// Modes that draw something; one report page each.
    pub const DRAWABLE: [PlotMode; 4] = [
        PlotMode::Line,
        PlotMode::Histogram,
        PlotMode::Spectrum,
        PlotMode::Regression,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlotMode::None => "Select plot",
            PlotMode::Line => "Line",
            PlotMode::Histogram => "Histogram",
            PlotMode::Spectrum => "Spectrum",
            PlotMode::Regression => "Regression",
        }
    }

    /// "Frequency" for spectra, "Time" otherwise.
    pub fn x_label(&self) -> &'static str {
        match self {
            PlotMode::Spectrum => "Frequency",
            _ => "Time",
        }
    }

    /// "Frequency" for histograms, "Amplitude" otherwise.
    pub fn y_label(&self) -> &'static str {
        match self {
            PlotMode::Histogram => "Frequency",
            _ => "Amplitude",
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// One row of the statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub name: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl StatsRow {
    /// Name followed by mean, median and std-dev at 2 decimals.
    pub fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            format!("{:.2}", self.mean),
            format!("{:.2}", self.median),
            format!("{:.2}", self.std_dev),
        ]
    }
}

/// One row per resolved dataset, in selection order.
pub fn statistics(registry: &Registry, selection: &Selection) -> Vec<StatsRow> {
    stats_rows(&resolve(registry, selection))
}

pub(crate) fn stats_rows(datasets: &[Selected<'_>]) -> Vec<StatsRow> {
    datasets
        .iter()
        .filter_map(|sel| {
            let s = Summary::compute(sel.dataset.y())?;
            Some(StatsRow {
                name: sel.name.to_string(),
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart construction
// ---------------------------------------------------------------------------

/// Legend wording differs between the live view and the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Labelling {
    /// Dataset name on the primary series; regression fit unlabelled.
    Live,
    /// Regression series labelled "{name} Data Points" / "{name} Fit".
    Report,
}

/// Build the chart for `mode` over `datasets`. `None` for [`PlotMode::None`].
pub fn build_chart(datasets: &[Selected<'_>], mode: PlotMode, labelling: Labelling) -> Option<Chart> {
    if mode == PlotMode::None {
        return None;
    }

    let mut series = Vec::with_capacity(datasets.len());
    for sel in datasets {
        let ds = sel.dataset;
        let name = sel.name.to_string();
        match mode {
            PlotMode::None => {}
            PlotMode::Line => series.push(Series {
                label: Some(name),
                kind: SeriesKind::Line,
                points: ds.points().collect(),
                slot: sel.slot,
                translucent: false,
            }),
            PlotMode::Histogram => {
                if let Some(hist) = Histogram::compute(ds.y(), HISTOGRAM_BINS) {
                    series.push(Series {
                        label: Some(name),
                        kind: SeriesKind::Bars {
                            width: hist.bin_width(),
                        },
                        points: hist.bars(),
                        slot: sel.slot,
                        translucent: true,
                    });
                }
            }
            PlotMode::Spectrum => series.push(Series {
                label: Some(name),
                kind: SeriesKind::Line,
                points: magnitude_spectrum(ds.x(), ds.y()),
                slot: sel.slot,
                translucent: false,
            }),
            PlotMode::Regression => {
                let (scatter_label, fit_label) = match labelling {
                    Labelling::Live => (name.clone(), None),
                    Labelling::Report => {
                        (format!("{name} Data Points"), Some(format!("{name} Fit")))
                    }
                };
                series.push(Series {
                    label: Some(scatter_label),
                    kind: SeriesKind::Points,
                    points: ds.points().collect(),
                    slot: sel.slot,
                    translucent: false,
                });
                if let Some(fit) = LinearFit::fit(ds.x(), ds.y()) {
                    series.push(Series {
                        label: fit_label,
                        kind: SeriesKind::Line,
                        points: ds.x().iter().map(|&x| [x, fit.eval(x)]).collect(),
                        slot: sel.slot,
                        translucent: false,
                    });
                } else {
                    log::debug!("No regression line for '{name}': fit undefined");
                }
            }
        }
    }

    Some(Chart {
        title: None,
        x_label: mode.x_label().to_string(),
        y_label: mode.y_label().to_string(),
        series,
    })
}

// ---------------------------------------------------------------------------
// DerivedView
// ---------------------------------------------------------------------------

/// Chart plus statistics table for one (registry, selection, mode) state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub mode: PlotMode,
    pub chart: Chart,
    pub stats: Vec<StatsRow>,
}

/// Compute the view for the current state. `None` means "leave whatever is
/// on screen untouched" ([`PlotMode::None`]).
pub fn render(registry: &Registry, selection: &Selection, mode: PlotMode) -> Option<DerivedView> {
    let datasets = resolve(registry, selection);
    let chart = build_chart(&datasets, mode, Labelling::Live)?;
    Some(DerivedView {
        mode,
        chart,
        stats: stats_rows(&datasets),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_datasets() -> (Registry, Selection) {
        let mut reg = Registry::new();
        reg.load("A", &[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]).unwrap();
        reg.load("B", &[[0.0, 2.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
        let mut sel = Selection::default();
        sel.set(&reg, ["A", "B"]);
        (reg, sel)
    }

    #[test]
    fn statistics_table_for_two_datasets() {
        let (reg, sel) = two_datasets();
        let rows: Vec<[String; 4]> = statistics(&reg, &sel).iter().map(StatsRow::cells).collect();
        assert_eq!(
            rows,
            vec![
                ["A", "0.33", "0.00", "0.47"].map(String::from),
                ["B", "1.67", "2.00", "0.47"].map(String::from),
            ]
        );
    }

    #[test]
    fn line_mode_has_one_labelled_curve_per_dataset() {
        let (reg, sel) = two_datasets();
        let view = render(&reg, &sel, PlotMode::Line).unwrap();
        assert_eq!(view.chart.series.len(), 2);
        assert_eq!(view.chart.series[0].label.as_deref(), Some("A"));
        assert_eq!(view.chart.series[1].points, vec![[0.0, 2.0], [1.0, 1.0], [2.0, 2.0]]);
        assert!(view.chart.has_legend());
        assert_eq!(view.stats.len(), 2);
    }

    #[test]
    fn axis_labels_follow_mode() {
        let (reg, sel) = two_datasets();
        let labels = |mode| {
            let chart = render(&reg, &sel, mode).unwrap().chart;
            (chart.x_label, chart.y_label)
        };
        assert_eq!(labels(PlotMode::Line), ("Time".to_string(), "Amplitude".to_string()));
        assert_eq!(labels(PlotMode::Histogram), ("Time".to_string(), "Frequency".to_string()));
        assert_eq!(labels(PlotMode::Spectrum), ("Frequency".to_string(), "Amplitude".to_string()));
        assert_eq!(labels(PlotMode::Regression), ("Time".to_string(), "Amplitude".to_string()));
    }

    #[test]
    fn histogram_mode_uses_translucent_fixed_bins() {
        let (reg, sel) = two_datasets();
        let view = render(&reg, &sel, PlotMode::Histogram).unwrap();
        for s in &view.chart.series {
            assert!(s.translucent);
            assert_eq!(s.points.len(), HISTOGRAM_BINS);
            let total: f64 = s.points.iter().map(|p| p[1]).sum();
            assert_eq!(total, 3.0);
        }
    }

    #[test]
    fn regression_overlays_unlabelled_fit() {
        let mut reg = Registry::new();
        reg.load("r", &[[0.0, 0.0], [1.0, 2.0], [2.0, 4.0]]).unwrap();
        let mut sel = Selection::default();
        sel.set(&reg, ["r"]);

        let chart = render(&reg, &sel, PlotMode::Regression).unwrap().chart;
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].kind, SeriesKind::Points);
        let fit = &chart.series[1];
        assert_eq!(fit.label, None);
        assert_eq!(fit.slot, chart.series[0].slot);
        assert!((fit.points[2][1] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn regression_without_defined_fit_keeps_scatter() {
        let mut reg = Registry::new();
        reg.load("one", &[[1.0, 1.0]]).unwrap();
        let mut sel = Selection::default();
        sel.set(&reg, ["one"]);

        let chart = render(&reg, &sel, PlotMode::Regression).unwrap().chart;
        assert_eq!(chart.series.len(), 1);
    }

    #[test]
    fn spectrum_of_single_sample_renders() {
        let mut reg = Registry::new();
        reg.load("tiny", &[[0.0, 3.0]]).unwrap();
        let mut sel = Selection::default();
        sel.set(&reg, ["tiny"]);

        let view = render(&reg, &sel, PlotMode::Spectrum).unwrap();
        assert_eq!(view.chart.series.len(), 1);
        assert!(view.chart.series[0].points.is_empty());
        assert_eq!(view.stats.len(), 1);
    }

    #[test]
    fn none_mode_renders_nothing() {
        let (reg, sel) = two_datasets();
        assert!(render(&reg, &sel, PlotMode::None).is_none());
    }

    #[test]
    fn empty_selection_has_no_rows_and_no_legend() {
        let (reg, _) = two_datasets();
        let view = render(&reg, &Selection::default(), PlotMode::Line).unwrap();
        assert!(view.stats.is_empty());
        assert!(!view.chart.has_legend());
    }

    #[test]
    fn report_labelling_names_fit_lines() {
        let (reg, _) = two_datasets();
        let all = crate::data::selection::resolve_all(&reg);
        let chart = build_chart(&all, PlotMode::Regression, Labelling::Report).unwrap();
        let labels: Vec<_> = chart.series.iter().filter_map(|s| s.label.clone()).collect();
        assert_eq!(labels, ["A Data Points", "A Fit", "B Data Points", "B Fit"]);
    }
}
