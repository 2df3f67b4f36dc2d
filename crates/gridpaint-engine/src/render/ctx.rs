/// Device handles the cell and line renderers need for one frame.
///
/// Renderers build pipelines against `surface_format` and rebuild them when a
/// later frame reports a different one.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self { device, queue, surface_format }
    }

    /// True when a pipeline built for `built` cannot draw into this frame.
    #[inline]
    pub fn pipeline_stale(&self, built: Option<wgpu::TextureFormat>) -> bool {
        format_stale(built, self.surface_format)
    }
}

fn format_stale(built: Option<wgpu::TextureFormat>, current: wgpu::TextureFormat) -> bool {
    built != Some(current)
}

/// The frame's encoder and swapchain view, already cleared to the background.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Opens a pass that draws over what earlier passes left in the view.
    ///
    /// Cells and lines each open one, in draw order, so lines land on top.
    pub fn load_pass(&mut self, label: &'static str) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
