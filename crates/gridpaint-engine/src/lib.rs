//! gridpaint engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the grid layer:
//! the window loop, the wgpu device, input translation, frame timing and the
//! two renderers (instanced cells, grid lines).

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
