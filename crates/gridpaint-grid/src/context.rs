//! Everything the grid needs between frames, owned in one place.

use glam::{IVec2, Vec2};

use gridpaint_engine::coords::Viewport;
use gridpaint_engine::input::{
    InputEvent, InputFrame, InputState, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};
use gridpaint_engine::paint::Color;

use crate::backend::GraphicsBackend;
use crate::camera::{Camera, CameraController};
use crate::config::{ConfigError, GridConfig};
use crate::interaction::InteractionDriver;
use crate::overlay::LineOverlay;
use crate::store::CellGrid;

/// When a mutation reaches the device.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncPolicy {
    /// Upload right after the mutation.
    Immediate,
    /// Leave the upload to a later batch.
    Deferred,
}

/// What one input poll asked of the caller.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputOutcome {
    pub quit:    bool,
    pub panning: bool,
    /// Some cell changed and was uploaded.
    pub painted: bool,
}

/// Grid state, overlay, camera controller and input driver.
pub struct GridContext {
    config:      GridConfig,
    cells:       CellGrid,
    overlay:     LineOverlay,
    controller:  CameraController,
    interaction: InteractionDriver,
    /// Pointer position as of the event being processed.
    pointer:     Option<Vec2>,
}

impl GridContext {
    /// Validates `config`, builds the overlay, applies the startup fill and
    /// performs the first upload.
    pub fn new(config: GridConfig, backend: &mut dyn GraphicsBackend) -> Result<Self, ConfigError> {
        config.validate()?;

        let overlay = LineOverlay::for_grid(config.width, config.height, backend);
        let mut cells = CellGrid::new(config.width, config.height, config.background);
        let controller = CameraController::new(&config);
        controller.refresh_visible(&mut cells);

        if let Some(fill) = config.initial_fill {
            cells.fill(fill);
        }
        let uploaded = cells.sync(backend);

        log::info!(
            "grid {}x{}, camera at {}, {} cells uploaded",
            config.width,
            config.height,
            controller.camera().position(),
            uploaded
        );

        Ok(Self {
            interaction: InteractionDriver::new(&config.bindings),
            config,
            cells,
            overlay,
            controller,
            pointer: None,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    pub fn overlay(&self) -> &LineOverlay {
        &self.overlay
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    pub fn selected_color(&self) -> Color {
        self.interaction.selected()
    }

    /// Paints one cell. Returns whether it changed.
    pub fn add_cell(
        &mut self,
        at: IVec2,
        color: Color,
        policy: SyncPolicy,
        backend: &mut dyn GraphicsBackend,
    ) -> bool {
        let changed = self.cells.paint(at, color);
        if policy == SyncPolicy::Immediate {
            self.cells.sync(backend);
        }
        changed
    }

    /// Erases one cell. Returns whether it changed.
    pub fn remove_cell(
        &mut self,
        at: IVec2,
        policy: SyncPolicy,
        backend: &mut dyn GraphicsBackend,
    ) -> bool {
        let changed = self.cells.erase(at);
        if policy == SyncPolicy::Immediate {
            self.cells.sync(backend);
        }
        changed
    }

    /// Uploads the visible painted cells.
    pub fn sync(&mut self, backend: &mut dyn GraphicsBackend) -> usize {
        self.cells.sync(backend)
    }

    /// Applies one frame of input: camera events in arrival order, then
    /// palette selection, then painting with at most one upload.
    pub fn process_input(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        backend: &mut dyn GraphicsBackend,
    ) -> InputOutcome {
        let pan_button = self.config.bindings.pan;

        for ev in &frame.events {
            match ev {
                InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. })
                    if *button == pan_button =>
                {
                    self.pointer = Some(Vec2::new(*x, *y));
                    match state {
                        MouseButtonState::Pressed => {
                            self.controller.begin_pan(Some(Vec2::new(*x, *y)));
                        }
                        MouseButtonState::Released => {
                            self.controller.end_pan(&mut self.cells, backend);
                        }
                    }
                }

                InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                    self.pointer = Some(Vec2::new(*x, *y));
                }

                InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                    self.pointer = Some(Vec2::new(*x, *y));
                    self.controller
                        .pointer_moved(Vec2::new(*x, *y), &mut self.cells, backend);
                }

                InputEvent::MouseWheel { delta, .. } => {
                    self.controller
                        .zoom(delta.lines(), self.pointer, &mut self.cells, backend);
                }

                // The release goes to another window; treat focus loss as one.
                InputEvent::Focused(false) => {
                    self.controller.end_pan(&mut self.cells, backend);
                }

                _ => {}
            }
        }

        self.interaction.select_from_keys(input);

        let painted = self
            .interaction
            .apply(input, self.controller.camera(), &mut self.cells);
        if painted {
            self.cells.sync(backend);
        }

        InputOutcome {
            quit: frame.keys_pressed.contains(&self.config.bindings.quit),
            panning: self.controller.is_panning(),
            painted,
        }
    }

    /// Follows a window resize. Degenerate or unchanged sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport, backend: &mut dyn GraphicsBackend) {
        if viewport.width < 1.0 || viewport.height < 1.0 {
            return;
        }
        self.controller.resize(viewport, &mut self.cells, backend);
    }

    /// Sets the camera, then draws the cells and the grid lines over them.
    pub fn draw(&self, backend: &mut dyn GraphicsBackend) {
        backend.set_camera(self.camera().view_projection());
        self.cells.draw(backend);
        self.overlay.draw(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Draw, RecordingBackend};
    use gridpaint_engine::input::{Key, KeyState, Modifiers, MouseButton, MouseWheelDelta};

    fn context(z: f32) -> (GridContext, RecordingBackend) {
        let mut backend = RecordingBackend::new();
        let cfg = GridConfig::default().with_size(100, 100).with_camera_z(z);
        let ctx = GridContext::new(cfg, &mut backend).unwrap();
        (ctx, backend)
    }

    /// Feeds events through `InputState` the way the runtime does.
    fn poll(
        ctx: &mut GridContext,
        input: &mut InputState,
        backend: &mut RecordingBackend,
        events: Vec<InputEvent>,
    ) -> InputOutcome {
        let mut frame = InputFrame::default();
        for ev in events {
            input.apply_event(&mut frame, ev);
        }
        ctx.process_input(input, &frame, backend)
    }

    fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers: Modifiers::default() })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    // ── startup ───────────────────────────────────────────────────────────

    #[test]
    fn startup_uploads_overlay_and_cells_once() {
        let (ctx, backend) = context(15.0);
        assert_eq!(backend.line_uploads, 1);
        assert_eq!(backend.cell_uploads, 1);
        assert!(backend.instances.is_empty());
        assert_eq!(ctx.overlay().line_count(), 202);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut backend = RecordingBackend::new();
        let res = GridContext::new(GridConfig::default().with_size(0, 0), &mut backend);
        assert!(matches!(res, Err(ConfigError::EmptyGrid { .. })));
        assert_eq!(backend.line_uploads, 0);
    }

    #[test]
    fn initial_fill_is_one_batched_upload() {
        let mut backend = RecordingBackend::new();
        let cfg = GridConfig::default()
            .with_size(20, 20)
            .with_camera_z(500.0)
            .with_initial_fill(Color::RED);
        GridContext::new(cfg, &mut backend).unwrap();

        assert_eq!(backend.cell_uploads, 1);
        assert_eq!(backend.instances.len(), 400);
    }

    // ── add / remove ──────────────────────────────────────────────────────

    #[test]
    fn deferred_mutations_wait_for_sync() {
        let (mut ctx, mut backend) = context(15.0);
        let uploads = backend.cell_uploads;

        assert!(ctx.add_cell(IVec2::new(50, 50), Color::RED, SyncPolicy::Deferred, &mut backend));
        assert!(ctx.add_cell(IVec2::new(51, 50), Color::RED, SyncPolicy::Deferred, &mut backend));
        assert_eq!(backend.cell_uploads, uploads);

        ctx.sync(&mut backend);
        assert_eq!(backend.instances.len(), 2);
    }

    #[test]
    fn immediate_mutation_uploads() {
        let (mut ctx, mut backend) = context(15.0);
        ctx.add_cell(IVec2::new(50, 50), Color::BLUE, SyncPolicy::Immediate, &mut backend);
        assert_eq!(backend.instances.len(), 1);

        ctx.remove_cell(IVec2::new(50, 50), SyncPolicy::Immediate, &mut backend);
        assert_eq!(backend.instances[0].color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn out_of_bounds_add_is_noop() {
        let (mut ctx, mut backend) = context(15.0);
        assert!(!ctx.add_cell(IVec2::new(100, 0), Color::RED, SyncPolicy::Immediate, &mut backend));
        assert!(backend.instances.is_empty());
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn painting_syncs_once_per_poll() {
        let (mut ctx, mut backend) = context(15.0);
        let mut input = InputState::default();
        let before = backend.cell_uploads;

        let out = poll(&mut ctx, &mut input, &mut backend, vec![
            moved(400.0, 300.0),
            button(MouseButton::Left, MouseButtonState::Pressed, 400.0, 300.0),
        ]);
        assert!(out.painted);
        assert_eq!(backend.cell_uploads, before + 1);
        assert_eq!(backend.instances.len(), 1);

        // Same cell again: nothing changed, nothing uploaded.
        let out = poll(&mut ctx, &mut input, &mut backend, vec![]);
        assert!(!out.painted);
        assert_eq!(backend.cell_uploads, before + 1);
    }

    #[test]
    fn palette_key_changes_paint_color() {
        let (mut ctx, mut backend) = context(15.0);
        let mut input = InputState::default();
        poll(&mut ctx, &mut input, &mut backend, vec![
            key(Key::Digit3, KeyState::Pressed),
            moved(400.0, 300.0),
            button(MouseButton::Left, MouseButtonState::Pressed, 400.0, 300.0),
        ]);
        assert_eq!(ctx.selected_color(), Color::BLUE);
        assert_eq!(backend.instances[0].color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn deferred_pan_then_release_syncs_once() {
        let (mut ctx, mut backend) = context(40.0);
        let mut input = InputState::default();
        let before = backend.cell_uploads;

        let out = poll(&mut ctx, &mut input, &mut backend, vec![
            moved(400.0, 300.0),
            button(MouseButton::Middle, MouseButtonState::Pressed, 400.0, 300.0),
            moved(420.0, 310.0),
            moved(450.0, 330.0),
        ]);
        assert!(out.panning);
        assert_eq!(backend.cell_uploads, before);

        let out = poll(&mut ctx, &mut input, &mut backend, vec![
            button(MouseButton::Middle, MouseButtonState::Released, 450.0, 330.0),
        ]);
        assert!(!out.panning);
        assert_eq!(backend.cell_uploads, before + 1);
    }

    #[test]
    fn focus_loss_ends_pan() {
        let (mut ctx, mut backend) = context(40.0);
        let mut input = InputState::default();
        poll(&mut ctx, &mut input, &mut backend, vec![
            button(MouseButton::Middle, MouseButtonState::Pressed, 10.0, 10.0),
        ]);
        let out = poll(&mut ctx, &mut input, &mut backend, vec![InputEvent::Focused(false)]);
        assert!(!out.panning);
    }

    #[test]
    fn wheel_zooms_and_syncs() {
        let (mut ctx, mut backend) = context(15.0);
        let mut input = InputState::default();
        let before = backend.cell_uploads;
        poll(&mut ctx, &mut input, &mut backend, vec![InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
            modifiers: Modifiers::default(),
        }]);
        assert!(ctx.camera().distance_to_plane() < 15.0);
        assert_eq!(backend.cell_uploads, before + 1);
    }

    #[test]
    fn wheel_zooms_toward_pointer_at_scroll_time() {
        let wheel = || InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
            modifiers: Modifiers::default(),
        };

        let (mut expected, mut backend) = context(15.0);
        let mut input = InputState::default();
        poll(&mut expected, &mut input, &mut backend, vec![moved(100.0, 100.0), wheel()]);

        let (mut ctx, mut backend) = context(15.0);
        let mut input = InputState::default();
        poll(&mut ctx, &mut input, &mut backend, vec![
            moved(100.0, 100.0),
            wheel(),
            moved(700.0, 500.0),
        ]);

        let (a, b) = (ctx.camera().position(), expected.camera().position());
        assert!((a - b).length() < 1e-4, "{a:?} vs {b:?}");
        assert!(a.x < 50.0 && a.y > 50.0);
    }

    #[test]
    fn escape_quits() {
        let (mut ctx, mut backend) = context(15.0);
        let mut input = InputState::default();
        let out = poll(&mut ctx, &mut input, &mut backend, vec![key(Key::Escape, KeyState::Pressed)]);
        assert!(out.quit);
    }

    // ── resize / draw ─────────────────────────────────────────────────────

    #[test]
    fn degenerate_resize_is_ignored() {
        let (mut ctx, mut backend) = context(15.0);
        let before = backend.cell_uploads;
        ctx.resize(Viewport::new(0.0, 0.0), &mut backend);
        ctx.resize(Viewport::new(800.0, 600.0), &mut backend);
        assert_eq!(backend.cell_uploads, before);
        ctx.resize(Viewport::new(1024.0, 768.0), &mut backend);
        assert_eq!(backend.cell_uploads, before + 1);
    }

    #[test]
    fn draw_sets_camera_then_cells_then_lines() {
        let (mut ctx, mut backend) = context(15.0);
        ctx.add_cell(IVec2::new(50, 50), Color::RED, SyncPolicy::Immediate, &mut backend);
        ctx.draw(&mut backend);

        assert_eq!(backend.camera, Some(ctx.camera().view_projection()));
        assert_eq!(backend.draws, vec![Draw::Cells(1), Draw::Lines(404)]);
    }
}
