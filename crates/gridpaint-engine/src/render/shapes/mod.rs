//! Grid renderers: instanced cell quads and the line overlay.

mod common;

pub mod cells;
pub mod lines;

pub use cells::{CellInstance, CellRenderer};
pub use lines::{LineRenderer, LineVertex};
