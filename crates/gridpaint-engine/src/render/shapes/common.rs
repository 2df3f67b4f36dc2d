//! Shared GPU types and utilities used by the grid renderers.

use bytemuck::{Pod, Zeroable};

// ── camera uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(super) fn new(view_projection: glam::Mat4) -> Self {
        Self { view_projection: view_projection.to_cols_array_2d() }
    }
}

/// Minimum binding size for a uniform of type `T`.
///
/// `None` only for zero-sized types, which wgpu treats as "unchecked".
pub(super) fn uniform_binding_size<T>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1, one grid unit
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── pipeline state ────────────────────────────────────────────────────────

pub(super) fn primitive(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Grows `capacity` to fit `required` elements, returning the new capacity
/// when a reallocation is needed.
pub(super) fn grown_capacity(capacity: usize, required: usize) -> Option<usize> {
    if required <= capacity && capacity > 0 {
        None
    } else {
        Some(required.next_power_of_two().max(64))
    }
}

#[cfg(test)]
pub(super) fn validate_wgsl(src: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| e.emit_to_string(src))?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| format!("{e:?}"))?;
    Ok(())
}
