//! Grid lines drawn over the cells.

use glam::Vec3;

use gridpaint_engine::render::shapes::LineVertex;

use crate::backend::GraphicsBackend;

/// Append-only list of world-space line segments.
#[derive(Debug, Clone, Default)]
pub struct LineOverlay {
    vertices: Vec<LineVertex>,
}

impl LineOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the `height + 1` horizontal and `width + 1` vertical lines
    /// bounding every cell, and uploads them once.
    pub fn for_grid(width: u32, height: u32, backend: &mut dyn GraphicsBackend) -> Self {
        let (w, h) = (width as f32, height as f32);
        let mut vertices = Vec::with_capacity(2 * (width as usize + height as usize + 2));

        for j in 0..=height {
            let y = j as f32;
            vertices.push(LineVertex::new(0.0, y, 0.0));
            vertices.push(LineVertex::new(w, y, 0.0));
        }
        for i in 0..=width {
            let x = i as f32;
            vertices.push(LineVertex::new(x, 0.0, 0.0));
            vertices.push(LineVertex::new(x, h, 0.0));
        }

        backend.replace_line_vertices(&vertices);
        log::debug!("grid overlay: {} lines", vertices.len() / 2);

        Self { vertices }
    }

    /// Appends one segment and re-uploads the whole list.
    pub fn add_line(&mut self, start: Vec3, end: Vec3, backend: &mut dyn GraphicsBackend) {
        self.vertices.push(LineVertex::new(start.x, start.y, start.z));
        self.vertices.push(LineVertex::new(end.x, end.y, end.z));
        backend.replace_line_vertices(&self.vertices);
    }

    /// One line-list draw under the camera the caller set on `backend`.
    pub fn draw(&self, backend: &mut dyn GraphicsBackend) {
        backend.draw_lines(self.vertices.len() as u32);
    }

    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Draw, RecordingBackend};

    #[test]
    fn grid_lines_cover_every_boundary() {
        let mut backend = RecordingBackend::new();
        let overlay = LineOverlay::for_grid(4, 3, &mut backend);

        assert_eq!(overlay.line_count(), (3 + 1) + (4 + 1));
        assert_eq!(backend.line_uploads, 1);
        assert_eq!(backend.vertices.len(), overlay.vertices().len());

        // First horizontal line spans the width at y = 0.
        assert_eq!(overlay.vertices()[0], LineVertex::new(0.0, 0.0, 0.0));
        assert_eq!(overlay.vertices()[1], LineVertex::new(4.0, 0.0, 0.0));
        // Last vertical line sits at x = width.
        let n = overlay.vertices().len();
        assert_eq!(overlay.vertices()[n - 2], LineVertex::new(4.0, 0.0, 0.0));
        assert_eq!(overlay.vertices()[n - 1], LineVertex::new(4.0, 3.0, 0.0));
    }

    #[test]
    fn add_line_reuploads_everything() {
        let mut backend = RecordingBackend::new();
        let mut overlay = LineOverlay::for_grid(1, 1, &mut backend);
        overlay.add_line(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), &mut backend);

        assert_eq!(backend.line_uploads, 2);
        assert_eq!(backend.vertices.len(), 10);
        assert_eq!(overlay.line_count(), 5);
    }

    #[test]
    fn draw_issues_one_line_list() {
        let mut backend = RecordingBackend::new();
        let overlay = LineOverlay::for_grid(2, 2, &mut backend);
        overlay.draw(&mut backend);
        assert_eq!(backend.draws, vec![Draw::Lines(12)]);
    }
}
