use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::Array2;
use ndarray_npy::write_npy;

// ---------------------------------------------------------------------------
// Persistence of acquired series
// ---------------------------------------------------------------------------

/// Write `(x, y)` pairs as an `(N, 2)` f64 `.npy` array, readable by the loader.
pub fn write_pairs(path: &Path, pairs: &[[f64; 2]]) -> Result<()> {
    let flat: Vec<f64> = pairs.iter().flatten().copied().collect();
    let array = Array2::from_shape_vec((pairs.len(), 2), flat).context("shaping samples")?;
    write_npy(path, &array).with_context(|| format!("writing {}", path.display()))
}

/// `{dir}/{prefix}_{unix_seconds}.npy` for the current wall-clock second.
///
/// Two writes within the same second share a name; the later one wins.
pub fn timestamped_path(dir: &Path, prefix: &str) -> PathBuf {
    let ts = chrono::Utc::now().timestamp();
    dir.join(format!("{prefix}_{ts}.npy"))
}
