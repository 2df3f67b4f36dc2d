//! Color model shared between the grid and the renderers.

pub mod color;

pub use color::Color;
