//! Infinite, physics-driven 3D-arc carousel.
//!
//! The [`core`] module holds everything with real invariants: metrics,
//! the duplicated virtual track, cycle normalization, the arc projector and
//! the drag / wheel / momentum / snap drivers, all owned by a single
//! [`core::controller::CarouselController`].  Nothing in it touches a
//! terminal or any other rendering surface; hosts feed it input events and
//! frame ticks and read back projected card transforms.

pub mod config;
pub mod core;
