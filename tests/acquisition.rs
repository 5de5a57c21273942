use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use rusty_scope::acquisition::{single_slot, Producer, SignalParams};
use rusty_scope::config::AcquisitionConfig;
use rusty_scope::data::loader::load_file;

fn config(dir: PathBuf, save_interval_ms: u64) -> AcquisitionConfig {
    AcquisitionConfig {
        sample_interval_ms: 10,
        save_interval_ms,
        output_dir: dir,
        file_prefix: "data".to_string(),
    }
}

fn params() -> SignalParams {
    SignalParams::parse("2", "1", "3").unwrap()
}

#[test]
fn stop_writes_the_full_series_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (tx, rx) = single_slot();
    let producer = Producer::start(params(), &config(dir.path().into(), 3_600_000), tx).unwrap();

    thread::sleep(Duration::from_millis(120));
    assert!(producer.is_running());
    let report = producer.stop();

    assert_eq!(report.interval_saves, 0);
    assert!(report.samples >= 1);

    let path = report.final_path.expect("final save");
    assert!(path.starts_with(dir.path()));
    let saved = load_file(&path).unwrap();
    assert_eq!(saved.len(), report.samples);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    // Samples follow the configured wave.
    for (&t, &y) in saved.x().iter().zip(saved.y()) {
        assert!((y - (2.0 * (3.0 * t).sin() + 1.0)).abs() < 1e-12);
    }

    // The consumer sees a complete snapshot ending at the saved series' prefix.
    let latest = rx.latest().expect("published series");
    assert!(!latest.is_empty());
    assert!(latest.len() <= report.samples);
}

#[test]
fn interval_saves_happen_while_running() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (tx, _rx) = single_slot();
    let producer = Producer::start(params(), &config(dir.path().into(), 30), tx).unwrap();

    thread::sleep(Duration::from_millis(200));
    let report = producer.stop();

    assert!(report.interval_saves >= 1, "{report:?}");
    assert!(report.final_path.is_some());
}

#[test]
fn published_series_grows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (tx, rx) = single_slot();
    let producer = Producer::start(params(), &config(dir.path().into(), 3_600_000), tx).unwrap();

    thread::sleep(Duration::from_millis(60));
    let first = rx.latest().map(|s| s.len()).unwrap_or(0);
    thread::sleep(Duration::from_millis(60));
    let second = rx.latest().map(|s| s.len()).unwrap_or(0);
    producer.stop();

    assert!(second > first, "{first} -> {second}");
}

#[test]
fn unwritable_output_does_not_stop_the_producer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();
    // A regular file where the output directory should be.
    let (tx, _rx) = single_slot();
    let producer = Producer::start(params(), &config(blocker, 20), tx).unwrap();

    thread::sleep(Duration::from_millis(80));
    assert!(producer.is_running());
    let report = producer.stop();

    assert_eq!(report.interval_saves, 0);
    assert!(report.final_path.is_none());
    assert!(report.samples >= 1);
}
