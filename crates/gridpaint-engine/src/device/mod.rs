//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod gpu;

pub use gpu::{classify_surface_error, Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
