use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use rusty_scope::app::AnalysisApp;
use rusty_scope::data::loader::existing_paths;
use rusty_scope::state::AppState;

/// Load (x, y) datasets, plot them and export a PDF report.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Data files to load at startup (.npy, .csv, .json, .parquet).
    files: Vec<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    let paths = existing_paths(args.files);
    if !paths.is_empty() {
        for err in state.load_files(&paths) {
            log::warn!("{err}");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Scope – Data Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(AnalysisApp::new(state)))),
    )
}
