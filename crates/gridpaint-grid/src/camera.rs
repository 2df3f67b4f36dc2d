//! Perspective camera over the grid plane and the pan/zoom controller.

use glam::{Mat4, Vec2, Vec3};

use gridpaint_engine::coords::Viewport;

use crate::backend::GraphicsBackend;
use crate::config::GridConfig;
use crate::math::{unproject, Ray, VisibleRect};
use crate::store::CellGrid;

/// Lower bound on the distance used for pan speed, so motion never stalls at the plane.
const MIN_SPEED_DISTANCE: f32 = 1e-3;

// ── Camera ────────────────────────────────────────────────────────────────

/// Perspective camera looking down `-Z` at the grid plane `z = 0`.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward:  Vec3,
    up:       Vec3,

    fov_radians: f32,
    near:        f32,
    far:         f32,
    viewport:    Viewport,

    view:       Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, fov_degrees: f32, near: f32, far: f32, viewport: Viewport) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_radians: fov_degrees.to_radians(),
            near,
            far,
            viewport,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_view();
        camera.update_projection();
        camera
    }

    /// Camera centered over the grid at the configured height.
    pub fn from_config(config: &GridConfig) -> Self {
        let position = Vec3::new(
            config.width as f32 / 2.0,
            config.height as f32 / 2.0,
            config.initial_camera_z,
        );
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Self::new(position, config.fov_degrees, config.near, config.far, viewport)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Recomputes the projection for a new viewport. Invalid sizes are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }
        self.viewport = viewport;
        self.update_projection();
    }

    /// Height above the grid plane.
    pub fn distance_to_plane(&self) -> f32 {
        self.position.z
    }

    /// Ray from the camera through the screen position (logical px).
    pub fn pick_ray(&self, screen: Vec2) -> Ray {
        Ray::new(
            self.position,
            unproject(screen, self.viewport, self.projection, self.view),
        )
    }

    /// Point on `z = 0` under the screen position.
    pub fn ground_point(&self, screen: Vec2) -> Vec3 {
        self.pick_ray(screen).intersect_plane(Vec3::Z, Vec3::ZERO)
    }

    /// Grid window covered by the four screen corners, clamped to the grid.
    pub fn visible_rect(&self, width: u32, height: u32) -> VisibleRect {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let corners = [
            Vec2::new(0.0, h),
            Vec2::new(w, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(w, h),
        ];
        VisibleRect::enclosing(
            corners.map(|c| self.ground_point(c).truncate()),
            width,
            height,
        )
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.forward, self.up);
    }

    fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_radians, self.viewport.aspect(), self.near, self.far);
    }
}

// ── CameraController ──────────────────────────────────────────────────────

/// Whether the pan trigger is held.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PanState {
    Idle,
    /// `last` is the pointer position of the previous pan step.
    Panning { last: Option<Vec2> },
}

/// Drives the camera from pan/zoom input and keeps the grid's visible window
/// and uploads in step with it.
///
/// Close to the plane few cells are visible and panning re-uploads on every
/// step (real-time updating). Above the threshold a pan only moves the camera
/// and the upload happens once when the pan ends.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    pan:    PanState,

    realtime_updating:  bool,
    realtime_threshold: f32,
    pan_speed_factor:   f32,
    min_z:              f32,
    max_z:              f32,
}

impl CameraController {
    pub fn new(config: &GridConfig) -> Self {
        let camera = Camera::from_config(config);
        let realtime_updating = camera.distance_to_plane() <= config.realtime_threshold;
        Self {
            camera,
            pan: PanState::Idle,
            realtime_updating,
            realtime_threshold: config.realtime_threshold,
            pan_speed_factor: config.pan_speed_factor,
            min_z: config.min_camera_z,
            max_z: config.max_camera_z,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pan_state(&self) -> PanState {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    pub fn realtime_updating(&self) -> bool {
        self.realtime_updating
    }

    /// World units moved per full-viewport-width of pointer travel.
    pub fn pan_speed(&self) -> f32 {
        self.camera.distance_to_plane().max(MIN_SPEED_DISTANCE) * self.pan_speed_factor
    }

    /// Points the grid's visible window at what the camera currently sees.
    pub fn refresh_visible(&self, cells: &mut CellGrid) {
        cells.set_visible_rect(self.camera.visible_rect(cells.width(), cells.height()));
    }

    pub fn begin_pan(&mut self, pointer: Option<Vec2>) {
        if !self.is_panning() {
            log::trace!("pan start at {pointer:?}");
        }
        self.pan = PanState::Panning { last: pointer };
    }

    /// Handles a pointer move. While panning, moves the camera opposite to the
    /// pointer and re-uploads only in real-time mode. Returns whether the
    /// camera moved.
    pub fn pointer_moved(
        &mut self,
        pointer: Vec2,
        cells: &mut CellGrid,
        backend: &mut dyn GraphicsBackend,
    ) -> bool {
        self.update_realtime();

        let PanState::Panning { last } = self.pan else {
            return false;
        };
        self.pan = PanState::Panning { last: Some(pointer) };

        let Some(last) = last else {
            return false;
        };
        let delta = pointer - last;
        if delta == Vec2::ZERO {
            return false;
        }

        let width = self.camera.viewport().width;
        let step = -self.pan_speed() * Vec3::new(delta.x / width, -delta.y / width, 0.0);
        self.camera.translate(step);
        log::trace!("pan by {step:?} to {:?}", self.camera.position());

        self.refresh_visible(cells);
        if self.realtime_updating {
            cells.sync(backend);
        }
        true
    }

    /// Leaves pan mode. If panning deferred uploads, performs the one upload
    /// now. Returns whether a sync happened.
    pub fn end_pan(&mut self, cells: &mut CellGrid, backend: &mut dyn GraphicsBackend) -> bool {
        if !self.is_panning() {
            return false;
        }
        self.pan = PanState::Idle;
        log::trace!("pan end");

        if self.realtime_updating {
            return false;
        }
        cells.sync(backend);
        true
    }

    /// Moves the camera along the pick ray under `pointer` (screen center when
    /// unknown) by `lines * pan_speed`, keeping its height within the zoom
    /// range, then always re-uploads.
    pub fn zoom(
        &mut self,
        lines: f32,
        pointer: Option<Vec2>,
        cells: &mut CellGrid,
        backend: &mut dyn GraphicsBackend,
    ) {
        if lines == 0.0 || !lines.is_finite() {
            return;
        }

        let viewport = self.camera.viewport();
        let screen = pointer.unwrap_or(Vec2::new(viewport.width / 2.0, viewport.height / 2.0));
        let ray = self.camera.pick_ray(screen);

        let mut step = ray.direction * (lines * self.pan_speed());
        let z = self.camera.distance_to_plane();
        let target_z = (z + step.z).clamp(self.min_z, self.max_z);
        if step.z != 0.0 {
            // A camera already past a limit stays put rather than jumping back.
            step *= ((target_z - z) / step.z).clamp(0.0, 1.0);
        }

        self.camera.translate(step);
        log::trace!("zoom by {lines} to {:?}", self.camera.position());

        self.update_realtime();
        self.refresh_visible(cells);
        cells.sync(backend);
    }

    /// Adopts a new viewport size, then refreshes and re-uploads.
    pub fn resize(
        &mut self,
        viewport: Viewport,
        cells: &mut CellGrid,
        backend: &mut dyn GraphicsBackend,
    ) {
        if !viewport.is_valid() || viewport == self.camera.viewport() {
            return;
        }
        self.camera.set_viewport(viewport);
        log::debug!("viewport {}x{}", viewport.width, viewport.height);
        self.refresh_visible(cells);
        cells.sync(backend);
    }

    fn update_realtime(&mut self) {
        let realtime = self.camera.distance_to_plane() <= self.realtime_threshold;
        if realtime != self.realtime_updating {
            log::debug!(
                "real-time updating {} at height {:.2}",
                if realtime { "on" } else { "off" },
                self.camera.distance_to_plane()
            );
            self.realtime_updating = realtime;
        }
    }
}
