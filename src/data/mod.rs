/// Data layer: core types, loading, selection and persistence.
///
/// Architecture:
/// ```text
///  .npy / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (per-file errors)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Registry  │  name → Dataset, last load wins
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection  │  checked names → resolved datasets
///   └───────────┘
/// ```
///
/// `store` goes the other way: acquired series → `.npy`.

pub mod loader;
pub mod model;
pub mod selection;
pub mod store;
