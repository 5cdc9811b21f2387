//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the carousel's projected frame and turns it into cells
//! on the terminal.  No controller state is mutated here.

pub mod carousel_widget;
pub mod debug_overlay;
pub mod details;
pub mod halfblock;
pub mod indicator;
pub mod layout;
pub mod theme;
