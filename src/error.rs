use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types surfaced to the user
// ---------------------------------------------------------------------------

/// A source could not be decoded into paired numeric (x, y) samples.
///
/// Reported per file; never aborts loading of the other files in a batch.
#[derive(Debug, Error)]
#[error("malformed dataset '{name}': {reason}")]
pub struct MalformedDatasetError {
    /// Dataset name (file name for file sources).
    pub name: String,
    /// Human-readable cause chain.
    pub reason: String,
}

impl MalformedDatasetError {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an `anyhow` error, keeping the full context chain in `reason`.
    pub fn from_anyhow(name: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::new(name, format!("{err:#}"))
    }
}

/// Text typed into a numeric field did not parse as a finite number.
#[derive(Debug, Error)]
#[error("invalid {field}: '{input}' is not a number")]
pub struct InvalidNumericInputError {
    pub field: &'static str,
    pub input: String,
}

/// Building or moving the PDF report failed.
///
/// Whatever variant is returned, the scratch directory has already been
/// removed and nothing is left at the destination path.
#[derive(Debug, Error)]
pub enum ExportFailure {
    #[error("could not create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("could not build report: {0}")]
    Build(String),

    #[error("could not move report to {}: {source}", path.display())]
    Move {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
