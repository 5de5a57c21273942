use std::collections::BTreeMap;

use crate::error::MalformedDatasetError;

// ---------------------------------------------------------------------------
// Dataset – one loaded source
// ---------------------------------------------------------------------------

/// A named pair of equal-length numeric sequences.
///
/// Immutable after construction; `x.len() == y.len() >= 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from separate axes.
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>) -> Result<Self, MalformedDatasetError> {
        if x.len() != y.len() {
            return Err(MalformedDatasetError::new(
                name,
                format!("x has {} values but y has {}", x.len(), y.len()),
            ));
        }
        if x.is_empty() {
            return Err(MalformedDatasetError::new(name, "no samples"));
        }
        Ok(Self { x, y })
    }

    /// Build a dataset from `(x, y)` pairs.
    pub fn from_pairs(name: &str, pairs: &[[f64; 2]]) -> Result<Self, MalformedDatasetError> {
        let (x, y) = pairs.iter().map(|&[x, y]| (x, y)).unzip();
        Self::new(name, x, y)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples (never zero).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false` for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate samples as `[x, y]` points.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }
}

// ---------------------------------------------------------------------------
// Registry – every dataset loaded during this session
// ---------------------------------------------------------------------------

/// Name → dataset. Re-adding a name overwrites; there is no unload.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    datasets: BTreeMap<String, Dataset>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`, validating that `samples` are paired.
    pub fn load(
        &mut self,
        name: impl Into<String>,
        samples: &[[f64; 2]],
    ) -> Result<(), MalformedDatasetError> {
        let name = name.into();
        let dataset = Dataset::from_pairs(&name, samples)?;
        self.insert(name, dataset);
        Ok(())
    }

    /// Insert an already validated dataset. Returns the replaced one, if any.
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) -> Option<Dataset> {
        self.datasets.insert(name.into(), dataset)
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    /// Dataset names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// All datasets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.datasets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Position of `name` in display order; used as the dataset's colour slot.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.datasets.keys().position(|k| k == name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
