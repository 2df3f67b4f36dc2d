//! Grid math: dense 2D storage, visible-window flattening and picking.

mod grid2;
mod picking;
mod window;

pub use grid2::Grid2;
pub use picking::{grid_coord, intersect_ray_with_plane, unproject, Ray, PLANE_EPSILON};
pub use window::{axis_range, flatten_windowed, windowed, VisibleRect};
