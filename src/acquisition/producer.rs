use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::signal::SignalParams;
use super::slot::SlotSender;
use crate::config::AcquisitionConfig;
use crate::data::store::{timestamped_path, write_pairs};

/// Full accumulated series as `[t, y]` samples.
pub type Series = Vec<[f64; 2]>;

/// What the producer did before it exited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopReport {
    /// File written on stop; `None` if that write failed.
    pub final_path: Option<PathBuf>,
    /// Samples generated in total.
    pub samples: usize,
    /// Successful interval-triggered saves (the stop save not included).
    pub interval_saves: usize,
}

/// Handle to the background producer thread.
///
/// Starting twice is prevented by ownership: the UI holds at most one
/// `Producer`. Dropping the handle stops the thread like [`Producer::stop`].
pub struct Producer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<StopReport>>,
}

impl Producer {
    /// Spawn the producer. Each tick appends one sample and publishes the
    /// whole series to `out`.
    pub fn start(
        params: SignalParams,
        config: &AcquisitionConfig,
        out: SlotSender<Series>,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = thread::Builder::new().name("acquisition".into()).spawn({
            let stop = Arc::clone(&stop);
            let config = config.clone();
            move || run(params, &config, &out, &stop)
        })?;
        log::info!(
            "Acquisition started: {params:?}, tick {:?}, save every {:?}",
            config.sample_interval(),
            config.save_interval()
        );
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the thread to stop and wait for it.
    ///
    /// The thread notices the request at its next tick, writes the series
    /// once more and exits; the wait is therefore bounded by one tick plus
    /// that write.
    pub fn stop(mut self) -> StopReport {
        self.finish().unwrap_or_default()
    }

    fn finish(&mut self) -> Option<StopReport> {
        let handle = self.handle.take()?;
        self.stop.store(true, Ordering::Relaxed);
        match handle.join() {
            Ok(report) => {
                log::info!(
                    "Acquisition stopped after {} samples ({} interval saves)",
                    report.samples,
                    report.interval_saves
                );
                Some(report)
            }
            Err(_) => {
                log::error!("Acquisition thread panicked");
                None
            }
        }
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.finish();
    }
}

fn run(
    params: SignalParams,
    config: &AcquisitionConfig,
    out: &SlotSender<Series>,
    stop: &AtomicBool,
) -> StopReport {
    let start = Instant::now();
    let mut last_save = start;
    let mut series: Series = Vec::new();
    let mut interval_saves = 0;

    while !stop.load(Ordering::Relaxed) {
        let t = start.elapsed().as_secs_f64();
        series.push([t, params.sample(t)]);
        out.publish(series.clone());

        if last_save.elapsed() >= config.save_interval() {
            if save(config, &series).is_some() {
                interval_saves += 1;
            }
            last_save = Instant::now();
        }

        thread::sleep(config.sample_interval());
    }

    StopReport {
        final_path: save(config, &series),
        samples: series.len(),
        interval_saves,
    }
}

/// Write the series; failures are logged and otherwise ignored.
fn save(config: &AcquisitionConfig, series: &[[f64; 2]]) -> Option<PathBuf> {
    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        log::error!("Cannot create {}: {e}", config.output_dir.display());
        return None;
    }
    let path = timestamped_path(&config.output_dir, &config.file_prefix);
    match write_pairs(&path, series) {
        Ok(()) => {
            log::info!("Saved {} samples to {}", series.len(), path.display());
            Some(path)
        }
        Err(e) => {
            log::error!("Saving acquired series failed: {e:#}");
            None
        }
    }
}
