use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Polygon, Rgb,
};
use printpdf::path::{PaintMode, WindingOrder};

use super::ReportPage;
use crate::chart::{Chart, Series, SeriesKind};
use crate::color::{hue_color, lighten};

// A4 landscape, millimetres.
const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;

// Plot area.
const LEFT: f32 = 30.0;
const BOTTOM: f32 = 28.0;
const RIGHT: f32 = 222.0;
const TOP: f32 = 180.0;

const LEGEND_X: f32 = 230.0;
const LEGEND_STEP: f32 = 6.0;
const LEGEND_FONT: f32 = 8.0;

// Summary text.
const SUMMARY_TOP: f32 = PAGE_H * 0.9;
const SUMMARY_STEP: f32 = 10.0;
const SUMMARY_FLOOR: f32 = 15.0;

const TICKS: usize = 5;
const MARKER: f32 = 1.2;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render `pages` into a PDF at `path`. `n_slots` sizes the colour palette.
pub(super) fn write_pdf(pages: &[ReportPage], n_slots: usize, path: &Path) -> Result<()> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Analysis Report", Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("loading Helvetica")?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("loading Helvetica-Bold")?,
    };

    let mut first = Some(doc.get_page(first_page).get_layer(first_layer));
    let mut next_layer = || {
        first.take().unwrap_or_else(|| {
            let (p, l) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            doc.get_page(p).get_layer(l)
        })
    };

    for page in pages {
        match page {
            ReportPage::Summary { heading, lines } => {
                let layout = summary_layout(lines.len());
                let sheets = layout.last().map_or(1, |&(sheet, _)| sheet + 1);
                let layers: Vec<_> = (0..sheets).map(|_| next_layer()).collect();
                draw_summary(&layers, &fonts, heading, lines, &layout);
            }
            ReportPage::Chart(chart) => draw_chart(&next_layer(), &fonts, chart, n_slots),
        }
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .context("serialising PDF")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Sheet index and baseline of each summary line. The heading sits at
/// `SUMMARY_TOP` on the first sheet; lines continue on further sheets once
/// they would drop below `SUMMARY_FLOOR`.
fn summary_layout(n_lines: usize) -> Vec<(usize, f32)> {
    let mut sheet = 0;
    let mut y = SUMMARY_TOP;
    (0..n_lines)
        .map(|_| {
            y -= SUMMARY_STEP;
            if y < SUMMARY_FLOOR {
                sheet += 1;
                y = SUMMARY_TOP;
            }
            (sheet, y)
        })
        .collect()
}

fn draw_summary(
    layers: &[PdfLayerReference],
    fonts: &Fonts,
    heading: &str,
    lines: &[String],
    layout: &[(usize, f32)],
) {
    let x = PAGE_W * 0.05;
    for layer in layers {
        set_color(layer, [0, 0, 0]);
    }
    if let Some(layer) = layers.first() {
        layer.use_text(heading, 16.0, Mm(x), Mm(SUMMARY_TOP), &fonts.bold);
    }
    for (line, &(sheet, y)) in lines.iter().zip(layout) {
        if let Some(layer) = layers.get(sheet) {
            layer.use_text(line.as_str(), 12.0, Mm(x), Mm(y), &fonts.regular);
        }
    }
}

fn draw_chart(layer: &PdfLayerReference, fonts: &Fonts, chart: &Chart, n_slots: usize) {
    let frame = Frame::new(chart.bounds());

    set_color(layer, [0, 0, 0]);
    if let Some(title) = &chart.title {
        layer.use_text(title.as_str(), 14.0, Mm(LEFT), Mm(TOP + 12.0), &fonts.bold);
    }
    draw_axes(layer, fonts, chart, &frame);

    for series in &chart.series {
        let rgb = hue_color(series.slot, n_slots);
        draw_series(layer, series, rgb, &frame);
    }

    if chart.has_legend() {
        draw_legend(layer, fonts, chart, n_slots);
    }
}

// ---------------------------------------------------------------------------
// Axes, series, legend
// ---------------------------------------------------------------------------

/// Data → page coordinate mapping for the plot area.
struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new((x_min, x_max, y_min, y_max): (f64, f64, f64, f64)) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Page position in millimetres.
    fn map(&self, x: f64, y: f64) -> (f32, f32) {
        let fx = (x - self.x_min) / (self.x_max - self.x_min);
        let fy = (y - self.y_min) / (self.y_max - self.y_min);
        (
            LEFT + fx as f32 * (RIGHT - LEFT),
            BOTTOM + fy as f32 * (TOP - BOTTOM),
        )
    }
}

fn draw_axes(layer: &PdfLayerReference, fonts: &Fonts, chart: &Chart, frame: &Frame) {
    layer.set_outline_thickness(0.75);
    layer.add_line(polyline(&[
        (LEFT, TOP),
        (LEFT, BOTTOM),
        (RIGHT, BOTTOM),
        (RIGHT, TOP),
        (LEFT, TOP),
    ]));

    for i in 0..=TICKS {
        let f = i as f64 / TICKS as f64;

        let tx = LEFT + f as f32 * (RIGHT - LEFT);
        layer.add_line(polyline(&[(tx, BOTTOM), (tx, BOTTOM - 1.5)]));
        let xv = frame.x_min + f * (frame.x_max - frame.x_min);
        layer.use_text(tick_label(xv), 8.0, Mm(tx - 4.0), Mm(BOTTOM - 6.0), &fonts.regular);

        let ty = BOTTOM + f as f32 * (TOP - BOTTOM);
        layer.add_line(polyline(&[(LEFT, ty), (LEFT - 1.5, ty)]));
        let yv = frame.y_min + f * (frame.y_max - frame.y_min);
        layer.use_text(tick_label(yv), 8.0, Mm(LEFT - 16.0), Mm(ty - 1.0), &fonts.regular);
    }

    let x_mid = (LEFT + RIGHT) / 2.0 - chart.x_label.len() as f32;
    layer.use_text(chart.x_label.as_str(), 10.0, Mm(x_mid), Mm(BOTTOM - 14.0), &fonts.regular);
    layer.use_text(chart.y_label.as_str(), 10.0, Mm(LEFT - 16.0), Mm(TOP + 4.0), &fonts.regular);
}

fn draw_series(layer: &PdfLayerReference, series: &Series, rgb: [u8; 3], frame: &Frame) {
    let finite = series
        .points
        .iter()
        .filter(|[x, y]| x.is_finite() && y.is_finite());

    match series.kind {
        SeriesKind::Line => {
            set_color(layer, rgb);
            layer.set_outline_thickness(1.0);
            let points: Vec<(f32, f32)> = finite.map(|&[x, y]| frame.map(x, y)).collect();
            if points.len() >= 2 {
                layer.add_line(polyline(&points));
            }
        }
        SeriesKind::Points => {
            set_color(layer, rgb);
            for &[x, y] in finite {
                let (cx, cy) = frame.map(x, y);
                fill_rect(layer, cx - MARKER, cy - MARKER, cx + MARKER, cy + MARKER);
            }
        }
        SeriesKind::Bars { width } => {
            let fill = if series.translucent { lighten(rgb) } else { rgb };
            set_color(layer, fill);
            let base = 0.0_f64.max(frame.y_min);
            for &[x, y] in finite {
                let (x0, y0) = frame.map(x - width / 2.0, base);
                let (x1, y1) = frame.map(x + width / 2.0, y);
                fill_rect(layer, x0, y0, x1, y1);
            }
        }
    }
}

/// Row step and font size for `n_entries` legend rows. Rows shrink
/// together with the font so the last one stays above the plot floor.
fn legend_metrics(n_entries: usize) -> (f32, f32) {
    let span = TOP - 4.0 - BOTTOM;
    let step = match n_entries {
        0 | 1 => LEGEND_STEP,
        n => LEGEND_STEP.min(span / (n - 1) as f32),
    };
    (step, LEGEND_FONT * step / LEGEND_STEP)
}

fn draw_legend(layer: &PdfLayerReference, fonts: &Fonts, chart: &Chart, n_slots: usize) {
    let entries: Vec<(&Series, &String)> = chart
        .series
        .iter()
        .filter_map(|s| s.label.as_ref().map(|label| (s, label)))
        .collect();
    let (step, font_size) = legend_metrics(entries.len());
    let mark = step / LEGEND_STEP;

    let mut y = TOP - 4.0;
    for (series, label) in entries {
        let rgb = hue_color(series.slot, n_slots);
        match series.kind {
            SeriesKind::Line => {
                set_color(layer, rgb);
                layer.set_outline_thickness(1.5 * mark);
                let mid = y + mark;
                layer.add_line(polyline(&[(LEGEND_X, mid), (LEGEND_X + 8.0, mid)]));
            }
            SeriesKind::Points => {
                set_color(layer, rgb);
                fill_rect(layer, LEGEND_X + 3.0, y, LEGEND_X + 5.0, y + 2.0 * mark);
            }
            SeriesKind::Bars { .. } => {
                set_color(layer, if series.translucent { lighten(rgb) } else { rgb });
                fill_rect(layer, LEGEND_X, y, LEGEND_X + 8.0, y + 2.5 * mark);
            }
        }
        set_color(layer, [0, 0, 0]);
        layer.use_text(label.as_str(), font_size, Mm(LEGEND_X + 10.0), Mm(y), &fonts.regular);
        y -= step;
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

fn set_color(layer: &PdfLayerReference, [r, g, b]: [u8; 3]) {
    let color = Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ));
    layer.set_outline_color(color.clone());
    layer.set_fill_color(color);
}

fn polyline(points: &[(f32, f32)]) -> Line {
    Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect(),
        is_closed: false,
    }
}

fn fill_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32) {
    let ring = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
        .iter()
        .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
        .collect();
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn tick_label(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(1e-2..1e4).contains(&a) {
        format!("{v:.1e}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_switch_to_exponent() {
        assert_eq!(tick_label(0.0), "0.00");
        assert_eq!(tick_label(12.345), "12.35");
        assert_eq!(tick_label(123456.0), "1.2e5");
        assert_eq!(tick_label(0.0005), "5.0e-4");
    }

    #[test]
    fn summary_lines_continue_on_new_sheets() {
        let layout = summary_layout(25);
        assert_eq!(layout.len(), 25);
        assert_eq!(layout[0], (0, SUMMARY_TOP - SUMMARY_STEP));
        for &(_, y) in &layout {
            assert!((SUMMARY_FLOOR..PAGE_H).contains(&y), "line at {y} mm");
        }
        let (break_at, &(sheet, y)) = layout
            .iter()
            .enumerate()
            .find(|(_, (sheet, _))| *sheet == 1)
            .unwrap();
        assert_eq!((sheet, y), (1, SUMMARY_TOP));
        assert!(break_at > 10);
        assert!(layout.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn short_summary_fits_one_sheet() {
        assert!(summary_layout(5).iter().all(|&(sheet, _)| sheet == 0));
        assert!(summary_layout(0).is_empty());
    }

    #[test]
    fn legend_rows_stay_inside_plot_height() {
        assert_eq!(legend_metrics(3), (LEGEND_STEP, LEGEND_FONT));
        for n in [30, 50, 200] {
            let (step, font) = legend_metrics(n);
            let last = TOP - 4.0 - step * (n - 1) as f32;
            assert!(last >= BOTTOM - 1e-3, "{n} rows end at {last} mm");
            assert!(font < LEGEND_FONT);
        }
    }

    #[test]
    fn long_report_is_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("many.pdf");
        let lines = (0..25)
            .map(|i| format!("set{i}: Mean = 0.00, Median = 0.00, Std Dev = 0.00"))
            .collect();
        let series = (0..25)
            .map(|i| Series {
                label: Some(format!("set{i}")),
                kind: SeriesKind::Line,
                points: vec![[0.0, i as f64], [1.0, i as f64]],
                slot: i,
                translucent: false,
            })
            .collect();
        let pages = vec![
            ReportPage::Summary {
                heading: "Detailed Statistics".into(),
                lines,
            },
            ReportPage::Chart(Chart {
                title: None,
                x_label: "Time".into(),
                y_label: "Amplitude".into(),
                series,
            }),
        ];
        write_pdf(&pages, 25, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_is_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("r.pdf");
        let pages = vec![
            ReportPage::Summary {
                heading: "Detailed Statistics".into(),
                lines: vec!["a: Mean = 1.00, Median = 1.00, Std Dev = 0.00".into()],
            },
            ReportPage::Chart(Chart {
                title: Some("Combined Line Plot".into()),
                x_label: "Time".into(),
                y_label: "Amplitude".into(),
                series: vec![Series {
                    label: Some("a".into()),
                    kind: SeriesKind::Line,
                    points: vec![[0.0, 1.0], [1.0, 2.0]],
                    slot: 0,
                    translucent: false,
                }],
            }),
        ];
        write_pdf(&pages, 1, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
