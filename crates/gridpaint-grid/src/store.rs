//! Dense per-cell state and its upload to the device.

use glam::{IVec2, Mat4, Vec3};

use gridpaint_engine::paint::Color;
use gridpaint_engine::render::shapes::CellInstance;

use crate::backend::GraphicsBackend;
use crate::math::{windowed, Grid2, VisibleRect};

/// Owns the `width × height` cell state: placement transforms, colors and
/// painted flags.
///
/// Mutations never touch the device. [`CellGrid::sync`] uploads the painted
/// cells inside the visible rectangle as a full replacement of the instance
/// buffer, so its cost scales with the number of visible cells rather than
/// with the number of edits.
#[derive(Debug, Clone)]
pub struct CellGrid {
    transforms: Grid2<Mat4>,
    colors:     Grid2<Color>,
    painted:    Grid2<bool>,

    visible:    VisibleRect,
    background: Color,
    uploaded:   u32,
}

impl CellGrid {
    /// All cells start unpainted; the visible rectangle starts as the whole grid.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            transforms: Grid2::filled(width, height, Mat4::ZERO),
            colors:     Grid2::filled(width, height, Color::default()),
            painted:    Grid2::filled(width, height, false),
            visible:    VisibleRect::full(width, height),
            background,
            uploaded:   0,
        }
    }

    pub fn width(&self) -> u32 {
        self.painted.width()
    }

    pub fn height(&self) -> u32 {
        self.painted.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn contains(&self, at: IVec2) -> bool {
        self.painted.contains(at)
    }

    /// Places the cell at `(x, y, 0)`, gives it `color` and marks it painted.
    ///
    /// Returns whether anything changed; out-of-range coordinates are ignored.
    pub fn paint(&mut self, at: IVec2, color: Color) -> bool {
        let Some(painted) = self.painted.get_mut(at) else {
            return false;
        };
        let was_painted = std::mem::replace(painted, true);

        if let Some(t) = self.transforms.get_mut(at) {
            *t = placement(at);
        }

        let Some(c) = self.colors.get_mut(at) else {
            return !was_painted;
        };
        let changed = !was_painted || *c != color;
        *c = color;
        changed
    }

    /// Sets the cell to the background color. Transform and painted flag are
    /// left alone, so an erased cell keeps rendering while a never-painted one
    /// stays hidden.
    pub fn erase(&mut self, at: IVec2) -> bool {
        let background = self.background;
        match self.colors.get_mut(at) {
            Some(c) if *c != background => {
                *c = background;
                true
            }
            _ => false,
        }
    }

    /// Paints every cell with `color`. Nothing is uploaded.
    pub fn fill(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        self.transforms = Grid2::from_fn(w, h, placement);
        self.colors.fill(color);
        self.painted.fill(true);
    }

    pub fn set_visible_rect(&mut self, rect: VisibleRect) {
        self.visible = rect;
    }

    pub fn visible_rect(&self) -> VisibleRect {
        self.visible
    }

    pub fn color(&self, at: IVec2) -> Option<Color> {
        self.colors.get(at).copied()
    }

    pub fn is_painted(&self, at: IVec2) -> bool {
        self.painted.get(at).copied().unwrap_or(false)
    }

    /// Instance count of the last upload.
    pub fn uploaded_count(&self) -> u32 {
        self.uploaded
    }

    /// Painted cells inside the visible rectangle, outer `x`, inner `y`.
    pub fn visible_instances(&self) -> Vec<CellInstance> {
        let VisibleRect { bottom_left, top_right } = self.visible;

        let transforms = windowed(&self.transforms, bottom_left, top_right);
        let colors = windowed(&self.colors, bottom_left, top_right);
        let painted = windowed(&self.painted, bottom_left, top_right);

        painted
            .zip(transforms.zip(colors))
            .filter(|((_, painted), _)| **painted)
            .map(|(_, ((_, t), (_, c)))| CellInstance::new(*t, c.to_rgb_array()))
            .collect()
    }

    /// Replaces the device instance buffer with the visible painted cells.
    /// Returns the uploaded instance count.
    pub fn sync(&mut self, backend: &mut dyn GraphicsBackend) -> usize {
        let instances = self.visible_instances();
        backend.replace_cell_instances(&instances);
        self.uploaded = instances.len() as u32;

        log::debug!(
            "synced {} cells in window {:?}..{:?}",
            instances.len(),
            self.visible.bottom_left,
            self.visible.top_right
        );
        instances.len()
    }

    /// One instanced draw of whatever the last sync uploaded.
    pub fn draw(&self, backend: &mut dyn GraphicsBackend) {
        backend.draw_cells(self.uploaded);
    }
}

fn placement(at: IVec2) -> Mat4 {
    Mat4::from_translation(Vec3::new(at.x as f32, at.y as f32, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Draw, RecordingBackend};

    fn grid() -> CellGrid {
        CellGrid::new(10, 10, Color::WHITE)
    }

    // ── paint / erase ─────────────────────────────────────────────────────

    #[test]
    fn out_of_bounds_mutations_are_noops() {
        let mut g = grid();
        let before = g.clone().visible_instances();
        for at in [IVec2::new(-1, 0), IVec2::new(10, 3), IVec2::new(2, 10), IVec2::new(-4, -4)] {
            assert!(!g.paint(at, Color::RED));
            assert!(!g.erase(at));
        }
        assert_eq!(g.visible_instances(), before);
        assert!(!g.is_painted(IVec2::new(0, 0)));
    }

    #[test]
    fn painting_twice_equals_once() {
        let mut once = grid();
        once.paint(IVec2::new(4, 5), Color::BLUE);

        let mut twice = grid();
        assert!(twice.paint(IVec2::new(4, 5), Color::BLUE));
        assert!(!twice.paint(IVec2::new(4, 5), Color::BLUE));

        assert_eq!(once.visible_instances(), twice.visible_instances());
    }

    #[test]
    fn repainting_with_new_color_is_a_change() {
        let mut g = grid();
        g.paint(IVec2::new(1, 1), Color::RED);
        assert!(g.paint(IVec2::new(1, 1), Color::GREEN));
        assert_eq!(g.color(IVec2::new(1, 1)), Some(Color::GREEN));
    }

    #[test]
    fn black_paint_is_still_painted() {
        let mut g = grid();
        g.paint(IVec2::new(0, 0), Color::BLACK);
        assert_eq!(g.visible_instances().len(), 1);
    }

    #[test]
    fn erase_keeps_painted_flag() {
        let mut g = grid();
        g.paint(IVec2::new(2, 2), Color::RED);
        assert!(g.erase(IVec2::new(2, 2)));
        assert!(!g.erase(IVec2::new(2, 2)));
        assert!(g.is_painted(IVec2::new(2, 2)));
        assert_eq!(g.color(IVec2::new(2, 2)), Some(Color::WHITE));
    }

    #[test]
    fn erase_of_unpainted_cell_stays_hidden() {
        let mut g = grid();
        g.erase(IVec2::new(6, 6));
        assert!(g.visible_instances().is_empty());
    }

    // ── sync ──────────────────────────────────────────────────────────────

    #[test]
    fn paint_sync_erase_sync_scenario() {
        let mut g = grid();
        let mut backend = RecordingBackend::new();

        g.paint(IVec2::new(3, 3), Color::RED);
        assert_eq!(g.sync(&mut backend), 1);
        assert_eq!(backend.instances.len(), 1);
        assert_eq!(backend.instances[0].translation(), [3.0, 3.0, 0.0]);
        assert_eq!(backend.instances[0].color, [1.0, 0.0, 0.0]);

        g.erase(IVec2::new(3, 3));
        assert_eq!(g.sync(&mut backend), 1);
        assert_eq!(backend.instances[0].translation(), [3.0, 3.0, 0.0]);
        assert_eq!(backend.instances[0].color, [1.0, 1.0, 1.0]);
        assert_eq!(backend.cell_uploads, 2);
    }

    #[test]
    fn mutations_do_not_upload() {
        let mut g = grid();
        let backend = RecordingBackend::new();
        g.paint(IVec2::new(1, 2), Color::RED);
        g.erase(IVec2::new(1, 2));
        assert_eq!(backend.cell_uploads, 0);
    }

    #[test]
    fn sync_replaces_rather_than_appends() {
        let mut g = grid();
        let mut backend = RecordingBackend::new();
        g.paint(IVec2::new(0, 0), Color::RED);
        g.sync(&mut backend);
        g.sync(&mut backend);
        assert_eq!(backend.instances.len(), 1);
        assert_eq!(g.uploaded_count(), 1);
    }

    #[test]
    fn sync_culls_to_visible_rect() {
        let mut g = grid();
        let mut backend = RecordingBackend::new();
        g.paint(IVec2::new(1, 1), Color::RED);
        g.paint(IVec2::new(8, 8), Color::BLUE);

        g.set_visible_rect(VisibleRect::new(IVec2::new(0, 0), IVec2::new(4, 4)));
        assert_eq!(g.sync(&mut backend), 1);
        assert_eq!(backend.instances[0].translation(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn instances_ordered_by_x_then_y() {
        let mut g = grid();
        g.paint(IVec2::new(2, 0), Color::RED);
        g.paint(IVec2::new(0, 5), Color::RED);
        g.paint(IVec2::new(0, 1), Color::RED);
        let order: Vec<[f32; 3]> = g.visible_instances().iter().map(|i| i.translation()).collect();
        assert_eq!(order, vec![[0.0, 1.0, 0.0], [0.0, 5.0, 0.0], [2.0, 0.0, 0.0]]);
    }

    #[test]
    fn fill_paints_everything() {
        let mut g = grid();
        let mut backend = RecordingBackend::new();
        g.fill(Color::RED);
        assert_eq!(g.sync(&mut backend), 100);
        assert!(backend.instances.iter().all(|i| i.color == [1.0, 0.0, 0.0]));
        assert_eq!(backend.instances[99].translation(), [9.0, 9.0, 0.0]);
    }

    #[test]
    fn draw_uses_uploaded_count() {
        let mut g = grid();
        let mut backend = RecordingBackend::new();
        g.paint(IVec2::new(0, 0), Color::RED);
        g.paint(IVec2::new(0, 1), Color::RED);
        g.draw(&mut backend);
        g.sync(&mut backend);
        g.draw(&mut backend);
        assert_eq!(backend.draws, vec![Draw::Cells(0), Draw::Cells(2)]);
    }
}
