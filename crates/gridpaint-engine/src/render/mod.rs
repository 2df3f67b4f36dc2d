//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use. Geometry lives in world space; vertex shaders apply a
//! view-projection uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
