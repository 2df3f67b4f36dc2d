//! gridpaint grid: a paintable cell grid on top of `gridpaint-engine`.
//!
//! The grid lives on the z=0 plane with one world unit per cell. A perspective
//! camera looks down at it; only cells inside the camera's visible rectangle
//! that have been painted are uploaded to the GPU.
//!
//! ```rust,ignore
//! use gridpaint_grid::{GridApplication, GridConfig};
//!
//! GridApplication::new(GridConfig::default().with_size(500, 500))
//!     .title("gridpaint")
//!     .run()?;
//! ```

pub mod app;
pub mod backend;
pub mod camera;
pub mod config;
pub mod context;
pub mod gpu;
pub mod interaction;
pub mod math;
pub mod overlay;
pub mod store;

pub use app::{GridApp, GridApplication};
pub use backend::GraphicsBackend;
pub use camera::{Camera, CameraController, PanState};
pub use config::{Bindings, ConfigError, GridConfig};
pub use context::{GridContext, InputOutcome, SyncPolicy};
pub use gpu::WgpuBackend;
pub use interaction::InteractionDriver;
pub use overlay::LineOverlay;
pub use store::CellGrid;
