use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use rusty_scope::config::AcquisitionConfig;
use rusty_scope::ui::acquire::AcquireApp;

/// Generate a sine wave in real time, plot it live and save it periodically.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file overriding the default timing / output settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the saved `.npy` series (overrides the config file).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match AcquisitionConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{e:#}; using defaults");
                AcquisitionConfig::default()
            }
        },
        None => AcquisitionConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    log::info!("Acquisition config: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Real-Time Data Acquisition and Visualization",
        options,
        Box::new(|_cc| Ok(Box::new(AcquireApp::new(config)))),
    )
}
