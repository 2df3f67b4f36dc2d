use std::fmt;

use gridpaint_engine::input::{Key, MouseButton};
use gridpaint_engine::paint::Color;

// ── Bindings ──────────────────────────────────────────────────────────────

/// Input bindings for the grid controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    pub pan:   MouseButton,
    pub paint: MouseButton,
    pub erase: MouseButton,
    pub quit:  Key,
    /// Keys selecting a paint color. When several are held, the last one wins.
    pub palette: Vec<(Key, Color)>,
    /// Color selected before any palette key is pressed.
    pub initial_color: Color,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            pan:   MouseButton::Middle,
            paint: MouseButton::Left,
            erase: MouseButton::Right,
            quit:  Key::Escape,
            palette: vec![
                (Key::Digit1, Color::RED),
                (Key::Digit2, Color::GREEN),
                (Key::Digit3, Color::BLUE),
                (Key::Digit4, Color::YELLOW),
                (Key::Digit5, Color::MAGENTA),
                (Key::Digit6, Color::CYAN),
            ],
            initial_color: Color::GREEN,
        }
    }
}

// ── GridConfig ────────────────────────────────────────────────────────────

/// Grid, camera and input configuration.
///
/// All fields are public; the `with_*` methods are shorthands for the common ones.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub width:  u32,
    pub height: u32,

    /// Initial viewport in logical pixels. Follows window resizes afterwards.
    pub viewport_width:  f32,
    pub viewport_height: f32,

    /// Vertical field of view.
    pub fov_degrees: f32,
    pub near:        f32,
    pub far:         f32,

    /// Camera height above the grid at startup. The camera starts over the grid center.
    pub initial_camera_z: f32,

    /// Above this camera height, panning defers the upload until the pan ends.
    pub realtime_threshold: f32,

    /// Pan and zoom step per unit of camera height.
    pub pan_speed_factor: f32,

    pub min_camera_z: f32,
    pub max_camera_z: f32,

    /// Color painted into every cell at startup, uploaded in one batch.
    pub initial_fill: Option<Color>,

    /// Clear color; erased cells take this color.
    pub background: Color,

    pub bindings: Bindings,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width:  1000,
            height: 1000,
            viewport_width:  800.0,
            viewport_height: 600.0,
            fov_degrees: 90.0,
            near:        0.1,
            far:         1000.0,
            initial_camera_z:   15.0,
            realtime_threshold: 15.0,
            pan_speed_factor:   0.1,
            min_camera_z: 0.5,
            max_camera_z: 900.0,
            initial_fill: None,
            background:   Color::WHITE,
            bindings:     Bindings::default(),
        }
    }
}

impl GridConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_camera_z(mut self, z: f32) -> Self {
        self.initial_camera_z = z;
        self
    }

    pub fn with_realtime_threshold(mut self, threshold: f32) -> Self {
        self.realtime_threshold = threshold;
        self
    }

    pub fn with_initial_fill(mut self, color: Color) -> Self {
        self.initial_fill = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Checks the configuration for values the camera and grid cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid { width: self.width, height: self.height });
        }
        let viewport_ok = |v: f32| v.is_finite() && v > 0.0;
        if !viewport_ok(self.viewport_width) || !viewport_ok(self.viewport_height) {
            return Err(ConfigError::InvalidViewport {
                width:  self.viewport_width,
                height: self.viewport_height,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::InvalidFov(self.fov_degrees));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::InvalidClip { near: self.near, far: self.far });
        }
        if !(self.min_camera_z > 0.0 && self.min_camera_z <= self.max_camera_z) {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_camera_z,
                max: self.max_camera_z,
            });
        }
        if !(self.initial_camera_z >= self.min_camera_z && self.initial_camera_z <= self.max_camera_z) {
            return Err(ConfigError::CameraOutOfRange {
                z:   self.initial_camera_z,
                min: self.min_camera_z,
                max: self.max_camera_z,
            });
        }
        if !(self.pan_speed_factor.is_finite() && self.pan_speed_factor > 0.0) {
            return Err(ConfigError::InvalidPanSpeed(self.pan_speed_factor));
        }
        if self.bindings.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

// ── ConfigError ───────────────────────────────────────────────────────────

/// A configuration value the grid cannot run with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyGrid { width: u32, height: u32 },
    InvalidViewport { width: f32, height: f32 },
    InvalidFov(f32),
    InvalidClip { near: f32, far: f32 },
    InvalidZoomRange { min: f32, max: f32 },
    CameraOutOfRange { z: f32, min: f32, max: f32 },
    InvalidPanSpeed(f32),
    EmptyPalette,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport must be positive, got {width}x{height}")
            }
            ConfigError::InvalidFov(fov) => {
                write!(f, "field of view must be within (0, 180) degrees, got {fov}")
            }
            ConfigError::InvalidClip { near, far } => {
                write!(f, "clip planes need 0 < near < far, got near={near} far={far}")
            }
            ConfigError::InvalidZoomRange { min, max } => {
                write!(f, "camera height range needs 0 < min <= max, got {min}..{max}")
            }
            ConfigError::CameraOutOfRange { z, min, max } => {
                write!(f, "initial camera height {z} is outside the zoom range {min}..{max}")
            }
            ConfigError::InvalidPanSpeed(v) => write!(f, "pan speed factor must be positive, got {v}"),
            ConfigError::EmptyPalette => write!(f, "palette has no colors"),
        }
    }
}

impl std::error::Error for ConfigError {}
