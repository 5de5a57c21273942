use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use ndarray::Array2;
use ndarray_npy::read_npy;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::Dataset;
use crate::error::MalformedDatasetError;

/// File extensions accepted by [`load_file`], for file dialogs.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["npy", "csv", "json", "parquet", "pq"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Datasets decoded from a batch of files, plus the files that failed.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub loaded: Vec<(String, Dataset)>,
    pub failed: Vec<MalformedDatasetError>,
}

/// Load every path independently; one bad file never aborts the batch.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for path in paths {
        let path = path.as_ref();
        match load_file(path) {
            Ok(dataset) => {
                let name = dataset_name(path);
                log::info!("Loaded '{name}' ({} samples)", dataset.len());
                outcome.loaded.push((name, dataset));
            }
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                outcome.failed.push(e);
            }
        }
    }
    outcome
}

/// Name a dataset after its source file (file name including extension).
pub fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a single (x, y) dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.npy`     – 2-D array of shape `(N, 2)`, rows are `(x, y)` pairs
/// * `.csv`     – header row with `x` and `y` columns, one sample per record
/// * `.json`    – `[[x, y], ...]` or `{ "x": [...], "y": [...] }`
/// * `.parquet` – numeric `x` and `y` columns
pub fn load_file(path: &Path) -> Result<Dataset, MalformedDatasetError> {
    let name = dataset_name(path);
    let pairs = read_pairs(path).map_err(|e| MalformedDatasetError::from_anyhow(&name, &e))?;
    Dataset::from_pairs(&name, &pairs)
}

fn read_pairs(path: &Path) -> Result<Vec<[f64; 2]>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "npy" => load_npy(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// NumPy loader
// ---------------------------------------------------------------------------

/// Read an `(N, 2)` array.  Float and integer dtypes are widened to `f64`.
fn load_npy(path: &Path) -> Result<Vec<[f64; 2]>> {
    let f64_err = match read_npy::<_, Array2<f64>>(path) {
        Ok(array) => return array_to_pairs(&array),
        Err(e) => e,
    };
    if let Ok(array) = read_npy::<_, Array2<f32>>(path) {
        return array_to_pairs(&array.mapv(f64::from));
    }
    if let Ok(array) = read_npy::<_, Array2<i64>>(path) {
        return array_to_pairs(&array.mapv(|v| v as f64));
    }
    if let Ok(array) = read_npy::<_, Array2<i32>>(path) {
        return array_to_pairs(&array.mapv(f64::from));
    }
    Err(f64_err).context("reading .npy array of (x, y) pairs")
}

fn array_to_pairs(array: &Array2<f64>) -> Result<Vec<[f64; 2]>> {
    if array.ncols() != 2 {
        bail!("expected an array of shape (N, 2), got {:?}", array.shape());
    }
    Ok(array.rows().into_iter().map(|row| [row[0], row[1]]).collect())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvSample {
    x: f64,
    y: f64,
}

/// CSV layout: header row naming at least `x` and `y`; other columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<[f64; 2]>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize::<CsvSample>()
        .enumerate()
        .map(|(row_no, record)| {
            let sample = record.with_context(|| format!("CSV row {row_no}"))?;
            Ok([sample.x, sample.y])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSamples {
    Pairs(Vec<[f64; 2]>),
    Columns { x: Vec<f64>, y: Vec<f64> },
}

fn load_json(path: &Path) -> Result<Vec<[f64; 2]>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let samples: JsonSamples = serde_json::from_str(&text)
        .context("expected [[x, y], ...] or {\"x\": [...], \"y\": [...]}")?;

    match samples {
        JsonSamples::Pairs(pairs) => Ok(pairs),
        JsonSamples::Columns { x, y } => {
            if x.len() != y.len() {
                bail!("x has {} values but y has {}", x.len(), y.len());
            }
            Ok(x.into_iter().zip(y).map(|(x, y)| [x, y]).collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema: numeric `x` and `y` columns (any int/float width).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<[f64; 2]>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut pairs = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        let x = column_as_f64(batch.column(x_idx)).context("column 'x'")?;
        let y = column_as_f64(batch.column(y_idx)).context("column 'y'")?;
        pairs.extend(x.into_iter().zip(y).map(|(x, y)| [x, y]));
    }

    Ok(pairs)
}

/// Cast a numeric Arrow column to `f64`, rejecting nulls.
fn column_as_f64(col: &ArrayRef) -> Result<Vec<f64>> {
    if !col.data_type().is_numeric() {
        bail!("expected a numeric column, got {:?}", col.data_type());
    }
    if col.null_count() > 0 {
        bail!("{} null value(s)", col.null_count());
    }
    let casted = cast(col, &DataType::Float64).context("casting to Float64")?;
    Ok(casted.as_primitive::<Float64Type>().values().to_vec())
}

/// Collect the file paths passed on a command line, keeping only existing files.
pub fn existing_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| {
            let ok = p.is_file();
            if !ok {
                log::warn!("Ignoring {}: not a file", p.display());
            }
            ok
        })
        .collect()
}
