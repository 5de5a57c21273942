use eframe::egui::{self, Color32, RichText, Ui};

use crate::acquisition::producer::Series;
use crate::acquisition::{single_slot, Producer, SignalParams, SlotReceiver};
use crate::config::AcquisitionConfig;
use crate::ui::panels::warn_dialog;
use crate::ui::plot::live_plot;

// ---------------------------------------------------------------------------
// eframe App for the acquisition window
// ---------------------------------------------------------------------------

/// Signal inputs, Start/Stop toggle and a live plot.
///
/// Closing the window stops a running [`Producer`], which performs the
/// final save.
pub struct AcquireApp {
    config: AcquisitionConfig,
    amplitude: String,
    offset: String,
    frequency: String,
    producer: Option<Producer>,
    incoming: Option<SlotReceiver<Series>>,
    /// Latest series received from the producer; kept after stop.
    series: Series,
    status_message: Option<String>,
}

impl AcquireApp {
    pub fn new(config: AcquisitionConfig) -> Self {
        Self {
            config,
            amplitude: "1.0".to_string(),
            offset: "0.0".to_string(),
            frequency: "1.0".to_string(),
            producer: None,
            incoming: None,
            series: Vec::new(),
            status_message: None,
        }
    }

    fn is_running(&self) -> bool {
        self.producer.as_ref().is_some_and(Producer::is_running)
    }

    /// Start when idle, stop when running. Inputs are validated first; on
    /// invalid input nothing changes.
    fn toggle(&mut self) {
        let params = match SignalParams::parse(&self.amplitude, &self.offset, &self.frequency) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{e}");
                warn_dialog(
                    "Invalid Input",
                    "Please enter valid numerical values for amplitude, offset, and frequency.",
                );
                return;
            }
        };

        match self.producer.take() {
            Some(producer) if producer.is_running() => self.stop(producer),
            _ => self.start(params),
        }
    }

    fn start(&mut self, params: SignalParams) {
        let (tx, rx) = single_slot();
        match Producer::start(params, &self.config, tx) {
            Ok(producer) => {
                self.producer = Some(producer);
                self.incoming = Some(rx);
                self.series.clear();
                self.status_message = Some("Acquiring…".to_string());
            }
            Err(e) => {
                log::error!("Could not start acquisition thread: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn stop(&mut self, producer: Producer) {
        let report = producer.stop();
        if let Some(rx) = &self.incoming {
            if let Some(series) = rx.latest() {
                self.series = series;
            }
        }
        self.incoming = None;
        self.status_message = Some(match &report.final_path {
            Some(path) => format!("{} samples saved to {}", report.samples, path.display()),
            None => "Error: final save failed (see log)".to_string(),
        });
    }

    /// Stop a running producer, skipping input validation.
    fn shutdown(&mut self) {
        if let Some(producer) = self.producer.take() {
            self.stop(producer);
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        let running = self.is_running();
        egui::Grid::new("signal_inputs")
            .num_columns(2)
            .show(ui, |ui: &mut Ui| {
                for (label, value) in [
                    ("Amplitude:", &mut self.amplitude),
                    ("Offset:", &mut self.offset),
                    ("Frequency:", &mut self.frequency),
                ] {
                    ui.label(label);
                    ui.add_enabled(!running, egui::TextEdit::singleline(value));
                    ui.end_row();
                }
            });

        ui.horizontal(|ui: &mut Ui| {
            let label = if running {
                "Stop Plotting"
            } else {
                "Start Plotting"
            };
            if ui.button(label).clicked() {
                self.toggle();
            }
            if let Some(msg) = &self.status_message {
                let color = if msg.starts_with("Error") {
                    Color32::RED
                } else {
                    ui.visuals().weak_text_color()
                };
                ui.label(RichText::new(msg).color(color));
            }
        });
    }
}

impl eframe::App for AcquireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(series) = self.incoming.as_ref().and_then(SlotReceiver::latest) {
            self.series = series;
        }
        if self.is_running() {
            ctx.request_repaint_after(self.config.sample_interval());
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            live_plot(ui, &self.series);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn npy_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "npy")
            })
            .count()
    }

    #[test]
    fn shutdown_performs_the_final_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AcquisitionConfig {
            sample_interval_ms: 5,
            save_interval_ms: 600_000,
            output_dir: dir.path().to_path_buf(),
            ..AcquisitionConfig::default()
        };
        let mut app = AcquireApp::new(config);
        app.start(SignalParams::parse("1", "0", "1").unwrap());
        assert!(app.is_running());
        std::thread::sleep(Duration::from_millis(30));

        app.shutdown();

        assert!(app.producer.is_none());
        assert_eq!(npy_files(dir.path()), 1);
        assert!(!app.series.is_empty());
    }

    #[test]
    fn shutdown_when_idle_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AcquisitionConfig {
            output_dir: dir.path().to_path_buf(),
            ..AcquisitionConfig::default()
        };
        let mut app = AcquireApp::new(config);
        app.shutdown();
        assert_eq!(npy_files(dir.path()), 0);
    }
}
