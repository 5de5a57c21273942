use std::path::Path;

use crate::data::loader::{load_files, LoadOutcome};
use crate::data::model::Registry;
use crate::data::selection::Selection;
use crate::error::{ExportFailure, MalformedDatasetError};
use crate::pipeline::{render, DerivedView, PlotMode};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
///
/// Every mutating method ends in [`AppState::refresh`], so the view always
/// reflects the latest (registry, selection, mode).
#[derive(Debug, Default)]
pub struct AppState {
    /// Every dataset loaded this session.
    pub registry: Registry,

    /// Checked datasets.
    pub selection: Selection,

    /// Active plot mode.
    pub mode: PlotMode,

    /// Last rendered chart + statistics. Left untouched by `PlotMode::None`.
    pub view: Option<DerivedView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a batch of files; returns the per-file failures.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<MalformedDatasetError> {
        let LoadOutcome { loaded, failed } = load_files(paths);
        let n_loaded = loaded.len();
        for (name, dataset) in loaded {
            if self.registry.insert(name.clone(), dataset).is_some() {
                log::info!("Replaced dataset '{name}'");
            }
        }

        self.status_message = match (n_loaded, failed.len()) {
            (_, 0) => Some(format!("{n_loaded} dataset(s) loaded")),
            (n, f) => Some(format!("{n} dataset(s) loaded, {f} failed")),
        };
        self.refresh();
        failed
    }

    /// Insert or replace a dataset from raw pairs.
    pub fn load(&mut self, name: &str, samples: &[[f64; 2]]) -> Result<(), MalformedDatasetError> {
        self.registry.load(name, samples)?;
        self.refresh();
        Ok(())
    }

    /// Replace the selection; names not in the registry are dropped.
    pub fn set_selection<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set(&self.registry, names);
        self.refresh();
    }

    /// Check or uncheck one dataset in the list.
    pub fn toggle(&mut self, name: &str, checked: bool) {
        self.selection.toggle(&self.registry, name, checked);
        self.refresh();
    }

    pub fn set_mode(&mut self, mode: PlotMode) {
        self.mode = mode;
        self.refresh();
    }

    /// Recompute the derived view from scratch.
    ///
    /// With `PlotMode::None` nothing is recomputed and the previous view stays.
    pub fn refresh(&mut self) {
        match render(&self.registry, &self.selection, self.mode) {
            Some(view) => {
                log::debug!(
                    "Rendered {} view: {} series, {} stats rows",
                    view.mode,
                    view.chart.series.len(),
                    view.stats.len()
                );
                self.view = Some(view);
            }
            None => log::debug!("Plot mode is None; keeping current view"),
        }
    }

    /// Write the PDF report for every loaded dataset to `dest`.
    pub fn export_report(&mut self, dest: &Path) -> Result<(), ExportFailure> {
        let result = crate::report::export_report(&self.registry, dest);
        self.status_message = Some(match &result {
            Ok(()) => format!("Report saved to {}", dest.display()),
            Err(e) => format!("Error: {e}"),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.load("A", &[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]).unwrap();
        state.load("B", &[[0.0, 2.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
        state
    }

    #[test]
    fn selection_changes_recompute_view() {
        let mut state = loaded();
        state.set_mode(PlotMode::Line);
        assert_eq!(state.view.as_ref().unwrap().stats.len(), 0);

        state.toggle("A", true);
        assert_eq!(state.view.as_ref().unwrap().stats.len(), 1);

        state.set_selection(["A", "B", "ghost"]);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.stats.len(), 2);
        assert!(view.stats.iter().all(|row| row.name != "ghost"));
    }

    #[test]
    fn none_mode_keeps_previous_view() {
        let mut state = loaded();
        state.set_selection(["A"]);
        state.set_mode(PlotMode::Histogram);
        let before = state.view.clone();
        assert!(before.is_some());

        state.set_mode(PlotMode::None);
        assert_eq!(state.view, before);

        // Selection changes while in None mode leave the view alone too.
        state.set_selection(["A", "B"]);
        assert_eq!(state.view, before);
    }

    #[test]
    fn nothing_rendered_before_a_mode_is_chosen() {
        let mut state = loaded();
        state.set_selection(["A"]);
        assert!(state.view.is_none());
    }

    #[test]
    fn malformed_load_leaves_view_and_registry() {
        let mut state = loaded();
        state.set_selection(["A"]);
        state.set_mode(PlotMode::Line);
        let before = state.view.clone();

        assert!(state.load("A", &[]).is_err());
        assert_eq!(state.registry.len(), 2);
        assert_eq!(state.view, before);
    }
}
