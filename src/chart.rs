// ---------------------------------------------------------------------------
// Toolkit-independent chart description
// ---------------------------------------------------------------------------
//
// The pipeline produces a `Chart`; `ui::plot` draws it with egui_plot and
// `report::pdf` draws it onto a PDF page.

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesKind {
    /// Connected polyline.
    Line,
    /// Unconnected markers.
    Points,
    /// Vertical bars from zero, centred on each point's x.
    Bars { width: f64 },
}

/// One drawable series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label; `None` keeps the series out of the legend.
    pub label: Option<String>,
    pub kind: SeriesKind,
    pub points: Vec<[f64; 2]>,
    /// Colour slot of the owning dataset.
    pub slot: usize,
    /// Drawn semi-transparent so overlapping series stay visible.
    pub translucent: bool,
}

/// A complete chart: axes, optional title and series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// A legend is shown only if some series carries a label.
    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }

    /// `(x_min, x_max, y_min, y_max)` over every series, bars included from
    /// zero. Falls back to the unit square for an empty chart and widens
    /// degenerate ranges so they can be scaled.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for s in &self.series {
            let half = match s.kind {
                SeriesKind::Bars { width } => width / 2.0,
                _ => 0.0,
            };
            for &[x, y] in &s.points {
                if !(x.is_finite() && y.is_finite()) {
                    continue;
                }
                x_min = x_min.min(x - half);
                x_max = x_max.max(x + half);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
                if half > 0.0 {
                    y_min = y_min.min(0.0);
                }
            }
        }

        if x_min > x_max {
            return (0.0, 1.0, 0.0, 1.0);
        }
        let (x_min, x_max) = widen(x_min, x_max);
        let (y_min, y_max) = widen(y_min, y_max);
        (x_min, x_max, y_min, y_max)
    }
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: Option<&str>, kind: SeriesKind, points: Vec<[f64; 2]>) -> Series {
        Series {
            label: label.map(str::to_string),
            kind,
            points,
            slot: 0,
            translucent: false,
        }
    }

    #[test]
    fn legend_requires_a_label() {
        let mut chart = Chart::default();
        assert!(!chart.has_legend());
        chart.series.push(series(None, SeriesKind::Line, vec![[0.0, 0.0]]));
        assert!(!chart.has_legend());
        chart.series.push(series(Some("a"), SeriesKind::Line, vec![[0.0, 0.0]]));
        assert!(chart.has_legend());
    }

    #[test]
    fn bars_extend_bounds_to_zero_and_half_width() {
        let chart = Chart {
            series: vec![series(
                None,
                SeriesKind::Bars { width: 1.0 },
                vec![[1.0, 3.0], [2.0, 5.0]],
            )],
            ..Chart::default()
        };
        assert_eq!(chart.bounds(), (0.5, 2.5, 0.0, 5.0));
    }

    #[test]
    fn empty_and_degenerate_bounds() {
        assert_eq!(Chart::default().bounds(), (0.0, 1.0, 0.0, 1.0));
        let chart = Chart {
            series: vec![series(None, SeriesKind::Points, vec![[2.0, 4.0]])],
            ..Chart::default()
        };
        assert_eq!(chart.bounds(), (1.5, 2.5, 3.5, 4.5));
    }
}
