//! `GraphicsBackend` implementation on top of the engine's wgpu renderers.

use glam::Mat4;

use gridpaint_engine::render::shapes::{CellInstance, CellRenderer, LineRenderer, LineVertex};
use gridpaint_engine::render::{RenderCtx, RenderTarget};

use crate::backend::GraphicsBackend;

#[derive(Debug, Copy, Clone, PartialEq)]
enum DrawOp {
    Cells { count: u32, camera: Mat4 },
    Lines { count: u32, camera: Mat4 },
}

/// Records grid calls and replays them inside the frame's render pass.
///
/// Grid code runs before the surface texture is acquired, so uploads are kept
/// as pending buffers and draws as a list; [`WgpuBackend::flush`] applies both
/// to the renderers once a `RenderCtx` exists. Only the latest pending upload
/// of each kind survives, matching replace-all semantics.
pub struct WgpuBackend {
    pending_cells: Option<Vec<CellInstance>>,
    pending_lines: Option<Vec<LineVertex>>,
    camera:        Mat4,
    ops:           Vec<DrawOp>,

    cell_renderer: CellRenderer,
    line_renderer: LineRenderer,
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuBackend {
    pub fn new() -> Self {
        Self {
            pending_cells: None,
            pending_lines: None,
            camera:        Mat4::IDENTITY,
            ops:           Vec::new(),
            cell_renderer: CellRenderer::new(),
            line_renderer: LineRenderer::default(),
        }
    }

    /// Forgets the previous frame's draws. Pending uploads are kept.
    pub fn begin_frame(&mut self) {
        self.ops.clear();
    }

    /// Uploads pending buffers, then issues the recorded draws in order.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if let Some(instances) = self.pending_cells.take() {
            self.cell_renderer.upload(ctx, &instances);
        }
        if let Some(vertices) = self.pending_lines.take() {
            self.line_renderer.upload(ctx, &vertices);
        }

        for op in self.ops.drain(..) {
            match op {
                DrawOp::Cells { count, camera } => {
                    self.cell_renderer.render(ctx, target, camera, count);
                }
                DrawOp::Lines { count, camera } => {
                    self.line_renderer.render(ctx, target, camera, count);
                }
            }
        }
    }
}

impl GraphicsBackend for WgpuBackend {
    fn replace_cell_instances(&mut self, instances: &[CellInstance]) {
        self.pending_cells = Some(instances.to_vec());
    }

    fn replace_line_vertices(&mut self, vertices: &[LineVertex]) {
        self.pending_lines = Some(vertices.to_vec());
    }

    fn set_camera(&mut self, view_projection: Mat4) {
        self.camera = view_projection;
    }

    fn draw_cells(&mut self, instance_count: u32) {
        self.ops.push(DrawOp::Cells { count: instance_count, camera: self.camera });
    }

    fn draw_lines(&mut self, vertex_count: u32) {
        self.ops.push(DrawOp::Lines { count: vertex_count, camera: self.camera });
    }
}
