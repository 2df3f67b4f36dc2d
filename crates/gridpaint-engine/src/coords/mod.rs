//! Screen-space sizes shared across the runtime and renderers.
//!
//! Sizes are in logical pixels (DPI-aware), origin top-left, +Y down.

mod viewport;

pub use viewport::Viewport;
