//! Multi-page PDF report over every loaded dataset.
//!
//! ```text
//!  Registry ──► report_pages ──► pdf::write_pdf ──► scratch dir ──► move ──► dest
//! ```
//!
//! The scratch directory is a `tempfile::TempDir`, removed on every exit path
//! (including unwinding). Nothing is written to `dest` until the document is
//! complete.

mod pdf;

use std::fs;
use std::path::Path;

use crate::chart::Chart;
use crate::data::model::Registry;
use crate::data::selection::resolve_all;
use crate::error::ExportFailure;
use crate::pipeline::{build_chart, stats_rows, Labelling, PlotMode, StatsRow};

const REPORT_FILE_NAME: &str = "analysis_report.pdf";
const SCRATCH_PREFIX: &str = "rusty-scope-report-";

/// One page of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPage {
    /// Heading plus one text line per dataset.
    Summary { heading: String, lines: Vec<String> },
    Chart(Chart),
}

/// `"{name}: Mean = .., Median = .., Std Dev = .."` at 2 decimals.
pub fn summary_line(row: &StatsRow) -> String {
    format!(
        "{}: Mean = {:.2}, Median = {:.2}, Std Dev = {:.2}",
        row.name, row.mean, row.median, row.std_dev
    )
}

/// Statistics page followed by one combined chart per drawable mode.
///
/// Independent of the live selection and mode: every dataset is included.
pub fn report_pages(registry: &Registry) -> Vec<ReportPage> {
    let all = resolve_all(registry);

    let mut pages = vec![ReportPage::Summary {
        heading: "Detailed Statistics".to_string(),
        lines: stats_rows(&all).iter().map(summary_line).collect(),
    }];

    for mode in PlotMode::DRAWABLE {
        if let Some(mut chart) = build_chart(&all, mode, Labelling::Report) {
            chart.title = Some(format!("Combined {} Plot", mode.label()));
            pages.push(ReportPage::Chart(chart));
        }
    }
    pages
}

/// Build the report and move it to `dest`, using the system temp directory
/// as scratch space.
pub fn export_report(registry: &Registry, dest: &Path) -> Result<(), ExportFailure> {
    export_report_in(registry, dest, &std::env::temp_dir())
}

/// Like [`export_report`] with an explicit parent for the scratch directory.
pub fn export_report_in(
    registry: &Registry,
    dest: &Path,
    scratch_root: &Path,
) -> Result<(), ExportFailure> {
    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(scratch_root)
        .map_err(ExportFailure::Scratch)?;
    let built = scratch.path().join(REPORT_FILE_NAME);

    let pages = report_pages(registry);
    let result = pdf::write_pdf(&pages, registry.len(), &built)
        .map_err(|e| ExportFailure::Build(format!("{e:#}")))
        .and_then(|()| move_file(&built, dest));

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        log::error!("Could not remove {}: {e}", scratch_path.display());
    }

    match &result {
        Ok(()) => log::info!(
            "Report with {} page(s) written to {}",
            pages.len(),
            dest.display()
        ),
        Err(e) => log::error!("Report export failed: {e}"),
    }
    result
}

/// Rename, falling back to copy across filesystems. A failed copy removes
/// whatever it left at `to`.
fn move_file(from: &Path, to: &Path) -> Result<(), ExportFailure> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    if let Err(source) = fs::copy(from, to) {
        let _ = fs::remove_file(to);
        return Err(ExportFailure::Move {
            path: to.to_path_buf(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cover_every_dataset_and_mode() {
        let mut reg = Registry::new();
        reg.load("A", &[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]).unwrap();
        reg.load("B", &[[0.0, 2.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();

        let pages = report_pages(&reg);
        assert_eq!(pages.len(), 5);

        match &pages[0] {
            ReportPage::Summary { heading, lines } => {
                assert_eq!(heading, "Detailed Statistics");
                assert_eq!(
                    lines,
                    &[
                        "A: Mean = 0.33, Median = 0.00, Std Dev = 0.47",
                        "B: Mean = 1.67, Median = 2.00, Std Dev = 0.47",
                    ]
                );
            }
            other => panic!("expected summary page, got {other:?}"),
        }

        let titles: Vec<_> = pages[1..]
            .iter()
            .map(|p| match p {
                ReportPage::Chart(c) => c.title.clone().unwrap_or_default(),
                ReportPage::Summary { .. } => String::new(),
            })
            .collect();
        assert_eq!(
            titles,
            [
                "Combined Line Plot",
                "Combined Histogram Plot",
                "Combined Spectrum Plot",
                "Combined Regression Plot",
            ]
        );
    }

    #[test]
    fn empty_registry_still_has_all_pages() {
        let pages = report_pages(&Registry::new());
        assert_eq!(pages.len(), 5);
    }
}
