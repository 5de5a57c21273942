//! Synthetic signal acquisition: one producer thread, a single-slot hand-off
//! to the UI, periodic persistence.
//!
//! ```text
//!  Producer thread ── tick (sample_interval) ──► series.push(sample)
//!        │                                          │
//!        │                      SlotSender::publish(full series)
//!        │                                          ▼
//!        │                             SlotReceiver::latest()  (UI thread)
//!        └── every save_interval, and once on stop ──► data::store
//! ```

pub mod producer;
pub mod signal;
pub mod slot;

pub use producer::{Producer, StopReport};
pub use signal::SignalParams;
pub use slot::{single_slot, SlotReceiver, SlotSender};
