//! Dataset analysis viewer and live signal acquisition, built on egui.
//!
//! The toolkit-independent core lives in [`data`], [`analysis`],
//! [`pipeline`], [`report`] and [`acquisition`]; [`app`] and [`ui`] are the
//! egui shells over it.

pub mod acquisition;
pub mod analysis;
pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod state;
pub mod ui;
