//! Numeric routines behind the plot modes and the statistics table.
//!
//! Every function here is pure and works on plain slices so both the live
//! view and the report share them.

pub mod histogram;
pub mod regression;
pub mod spectrum;
pub mod stats;

pub use histogram::Histogram;
pub use regression::LinearFit;
pub use spectrum::magnitude_spectrum;
pub use stats::Summary;
