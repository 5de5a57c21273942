use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rusty_scope::data::store::write_pairs;

/// Write a few demo datasets for the viewer.
#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    /// Output directory (created if missing).
    #[arg(long, default_value = "sample_data")]
    out_dir: PathBuf,

    /// Samples per dataset.
    #[arg(long, default_value_t = 512)]
    samples: usize,
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

fn series(t: &[f64], f: impl Fn(f64) -> f64) -> Vec<[f64; 2]> {
    t.iter().map(|&ti| [ti, f(ti)]).collect()
}

fn write_parquet(path: &Path, pairs: &[[f64; 2]]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));
    let x = Float64Array::from(pairs.iter().map(|p| p[0]).collect::<Vec<_>>());
    let y = Float64Array::from(pairs.iter().map(|p| p[1]).collect::<Vec<_>>());
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(x), Arc::new(y)])
        .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // 100 Hz sampling.
    let dt = 0.01;
    let t: Vec<f64> = (0..args.samples).map(|i| i as f64 * dt).collect();

    let sets: Vec<(&str, Vec<[f64; 2]>)> = vec![
        ("sine_5hz.npy", series(&t, |ti| (2.0 * PI * 5.0 * ti).sin())),
        (
            "two_tones.npy",
            series(&t, |ti| {
                0.8 * (2.0 * PI * 3.0 * ti).sin() + 0.3 * (2.0 * PI * 12.0 * ti).sin()
            }),
        ),
        (
            "damped.npy",
            series(&t, |ti| 2.0 * (-ti / 1.5).exp() * (2.0 * PI * 2.0 * ti).cos()),
        ),
        (
            "peaks.npy",
            series(&t, |ti| {
                gaussian(ti, 1.0, 0.15, 1.0) + gaussian(ti, 3.0, 0.3, 0.6) + 0.1
            }),
        ),
    ];
    for (name, pairs) in &sets {
        let path = args.out_dir.join(name);
        write_pairs(&path, pairs)?;
        println!("Wrote {} samples to {}", pairs.len(), path.display());
    }

    // Noisy linear trend, stored as Parquet to exercise the other loader.
    let ramp: Vec<[f64; 2]> = t
        .iter()
        .map(|&ti| [ti, 0.5 * ti + 1.0 + rng.gauss(0.0, 0.2)])
        .collect();
    let path = args.out_dir.join("noisy_ramp.parquet");
    write_parquet(&path, &ramp)?;
    println!("Wrote {} samples to {}", ramp.len(), path.display());

    Ok(())
}
