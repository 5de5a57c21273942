use std::collections::BTreeSet;

use super::model::{Dataset, Registry};

// ---------------------------------------------------------------------------
// Selection: which datasets are checked in the list
// ---------------------------------------------------------------------------

/// Set of checked dataset names.
///
/// Iteration order is name order, which matches the order of the dataset list.
/// Names missing from the registry are dropped when set and skipped when
/// resolved; neither case is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    /// Replace the selection, keeping only names present in `registry`.
    pub fn set<I, S>(&mut self, registry: &Registry, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names
            .into_iter()
            .map(Into::into)
            .filter(|n| {
                let known = registry.contains(n);
                if !known {
                    log::debug!("Dropping unknown dataset '{n}' from selection");
                }
                known
            })
            .collect();
    }

    /// Check or uncheck a single name. Unknown names are ignored.
    pub fn toggle(&mut self, registry: &Registry, name: &str, checked: bool) {
        if checked {
            if registry.contains(name) {
                self.names.insert(name.to_string());
            }
        } else {
            self.names.remove(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A selected dataset together with its name and colour slot.
#[derive(Debug, Clone, Copy)]
pub struct Selected<'a> {
    pub name: &'a str,
    pub dataset: &'a Dataset,
    /// Position in the registry's display order.
    pub slot: usize,
}

/// Datasets of `selection` that exist in `registry`, in selection order.
pub fn resolve<'a>(registry: &'a Registry, selection: &'a Selection) -> Vec<Selected<'a>> {
    selection
        .iter()
        .filter_map(|name| {
            let dataset = registry.get(name)?;
            let slot = registry.index_of(name)?;
            Some(Selected {
                name,
                dataset,
                slot,
            })
        })
        .collect()
}

/// Every dataset in `registry`, in display order.
pub fn resolve_all(registry: &Registry) -> Vec<Selected<'_>> {
    registry
        .iter()
        .enumerate()
        .map(|(slot, (name, dataset))| Selected {
            name,
            dataset,
            slot,
        })
        .collect()
}
