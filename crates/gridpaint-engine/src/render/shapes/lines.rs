use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{grown_capacity, primitive, uniform_binding_size};

/// One line endpoint in world space. Consecutive pairs form a segment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineUniform {
    view_projection: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Draws a line list with a single color.
pub struct LineRenderer {
    color: Color,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    vertex_count: u32,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl LineRenderer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_ubo: None,
            vertex_vbo: None,
            vertex_capacity: 0,
            vertex_count: 0,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Replaces the vertex buffer contents.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, vertices: &[LineVertex]) {
        self.vertex_count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        self.ensure_vertex_capacity(ctx, vertices.len());
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
    }

    /// Draws up to `vertex_count` uploaded vertices as a line list.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view_projection: Mat4,
        vertex_count: u32,
    ) {
        // Odd trailing vertex has no partner.
        let count = vertex_count.min(self.vertex_count) & !1;
        if count == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let u = LineUniform {
            view_projection: view_projection.to_cols_array_2d(),
            color: [self.color.r, self.color.g, self.color.b, self.color.a],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };

        let mut rpass = target.load_pass("gridpaint line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if !ctx.pipeline_stale(self.pipeline_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gridpaint line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gridpaint line bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: uniform_binding_size::<LineUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("gridpaint line pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gridpaint line pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LineVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: primitive(wgpu::PrimitiveTopology::LineList),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("line pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required_vertices: usize) {
        if self.vertex_vbo.is_some() && required_vertices <= self.vertex_capacity {
            return;
        }
        let Some(new_cap) = grown_capacity(self.vertex_capacity, required_vertices) else {
            return;
        };

        log::debug!("growing line vertex buffer to {new_cap}");

        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridpaint line vbo"),
            size: (new_cap * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridpaint line ubo"),
            size: std::mem::size_of::<LineUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gridpaint line bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_mat4_plus_color() {
        assert_eq!(std::mem::size_of::<LineUniform>(), 80);
        assert_eq!(std::mem::size_of::<LineVertex>(), 12);
    }

    #[test]
    fn default_line_color_is_black() {
        assert_eq!(LineRenderer::default().color, Color::BLACK);
    }

    #[test]
    fn line_shader_validates() {
        super::super::common::validate_wgsl(include_str!("shaders/lines.wgsl"))
            .unwrap_or_else(|e| panic!("lines.wgsl: {e}"));
    }
}
