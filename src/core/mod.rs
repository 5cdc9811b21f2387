//! Core carousel algorithms – geometry, projection and motion drivers.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All
//! positions are in surface pixels along the scroll axis; all times are
//! host-supplied monotonic [`std::time::Duration`]s.

pub mod controller;
pub mod cycle;
pub mod drag;
pub mod item;
pub mod metrics;
pub mod momentum;
pub mod projector;
pub mod scheduler;
pub mod snap;
pub mod track;
pub mod wheel;
