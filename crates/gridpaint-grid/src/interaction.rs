//! Pointer painting and palette selection.

use glam::{IVec2, Vec2};

use gridpaint_engine::input::{InputState, Key, MouseButton};
use gridpaint_engine::paint::Color;

use crate::camera::Camera;
use crate::config::Bindings;
use crate::math::grid_coord;
use crate::store::CellGrid;

/// Maps held buttons and the pointer position to paint/erase calls.
#[derive(Debug, Clone)]
pub struct InteractionDriver {
    palette:      Vec<(Key, Color)>,
    selected:     Color,
    paint_button: MouseButton,
    erase_button: MouseButton,
}

impl InteractionDriver {
    pub fn new(bindings: &Bindings) -> Self {
        Self {
            palette:      bindings.palette.clone(),
            selected:     bindings.initial_color,
            paint_button: bindings.paint,
            erase_button: bindings.erase,
        }
    }

    pub fn selected(&self) -> Color {
        self.selected
    }

    /// Selects the color of the held palette key listed last. Returns whether
    /// the selection changed.
    pub fn select_from_keys(&mut self, input: &InputState) -> bool {
        let Some(color) = self
            .palette
            .iter()
            .filter(|(key, _)| input.key_down(*key))
            .map(|(_, color)| *color)
            .last()
        else {
            return false;
        };

        if color == self.selected {
            return false;
        }
        log::debug!("palette color {color:?}");
        self.selected = color;
        true
    }

    /// Cell under the screen position, if it is on the grid.
    pub fn pick(camera: &Camera, cells: &CellGrid, screen: Vec2) -> Option<IVec2> {
        let at = grid_coord(camera.ground_point(screen));
        cells.contains(at).then_some(at)
    }

    /// Paints and/or erases under the last known pointer position while the
    /// matching buttons are held. Returns whether any cell changed.
    pub fn apply(&mut self, input: &InputState, camera: &Camera, cells: &mut CellGrid) -> bool {
        let painting = input.button_down(self.paint_button);
        let erasing = input.button_down(self.erase_button);
        if !painting && !erasing {
            return false;
        }

        let Some((x, y)) = input.pointer() else {
            return false;
        };
        let Some(at) = Self::pick(camera, cells, Vec2::new(x, y)) else {
            return false;
        };

        let mut changed = false;
        if painting {
            changed |= cells.paint(at, self.selected);
        }
        if erasing {
            changed |= cells.erase(at);
        }
        if changed {
            log::trace!("cell {at} -> {:?}", cells.color(at));
        }
        changed
    }
}
