//! The narrow device interface the grid talks to.

use glam::Mat4;

use gridpaint_engine::render::shapes::{CellInstance, LineVertex};

/// Device operations the grid needs. Buffers are always replaced whole.
pub trait GraphicsBackend {
    /// Replaces the cell instance buffer contents.
    fn replace_cell_instances(&mut self, instances: &[CellInstance]);

    /// Replaces the line vertex buffer contents.
    fn replace_line_vertices(&mut self, vertices: &[LineVertex]);

    /// Sets the view-projection used by subsequent draws.
    fn set_camera(&mut self, view_projection: Mat4);

    /// One instanced draw of the first `instance_count` cells.
    fn draw_cells(&mut self, instance_count: u32);

    /// One line-list draw of the first `vertex_count` vertices.
    fn draw_lines(&mut self, vertex_count: u32);
}

#[cfg(test)]
pub(crate) use recording::{Draw, RecordingBackend};

#[cfg(test)]
mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Draw {
        Cells(u32),
        Lines(u32),
    }

    /// Backend that remembers what it was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingBackend {
        pub cell_uploads: usize,
        pub line_uploads: usize,
        pub instances:    Vec<CellInstance>,
        pub vertices:     Vec<LineVertex>,
        pub camera:       Option<Mat4>,
        pub draws:        Vec<Draw>,
    }

    impl RecordingBackend {
        pub(crate) fn new() -> Self {
            Self::default()
        }
    }

    impl GraphicsBackend for RecordingBackend {
        fn replace_cell_instances(&mut self, instances: &[CellInstance]) {
            self.cell_uploads += 1;
            self.instances = instances.to_vec();
        }

        fn replace_line_vertices(&mut self, vertices: &[LineVertex]) {
            self.line_uploads += 1;
            self.vertices = vertices.to_vec();
        }

        fn set_camera(&mut self, view_projection: Mat4) {
            self.camera = Some(view_projection);
        }

        fn draw_cells(&mut self, instance_count: u32) {
            self.draws.push(Draw::Cells(instance_count));
        }

        fn draw_lines(&mut self, vertex_count: u32) {
            self.draws.push(Draw::Lines(vertex_count));
        }
    }
}
