use glam::{IVec2, Mat4, Vec2, Vec3, Vec4};

use gridpaint_engine::coords::Viewport;

/// Added to the ray/plane denominator so grazing rays give a large but finite hit.
pub const PLANE_EPSILON: f32 = 1e-5;

/// A half-line from `origin` along `direction` (unit length).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin:    Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Where the ray meets the plane through `point` with normal `normal`.
    pub fn intersect_plane(&self, normal: Vec3, point: Vec3) -> Vec3 {
        intersect_ray_with_plane(self.origin, self.direction, normal, point)
    }
}

/// World-space direction through the screen position `screen` (logical px,
/// origin top-left).
///
/// The pixel goes to normalized device coordinates, back through the inverse
/// projection onto the near plane, then becomes a direction (`w = 0`) that
/// the inverse view rotates into world space.
pub fn unproject(screen: Vec2, viewport: Viewport, projection: Mat4, view: Mat4) -> Vec3 {
    let ndc_x = 2.0 * screen.x / viewport.width - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y / viewport.height;

    let eye = projection.inverse() * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

    (view.inverse() * eye).truncate().normalize_or_zero()
}

/// Point where the ray `origin + t * direction` meets the plane through
/// `point` with normal `normal`.
///
/// Rays parallel to the plane are not detected; the epsilon only keeps the
/// division finite.
pub fn intersect_ray_with_plane(origin: Vec3, direction: Vec3, normal: Vec3, point: Vec3) -> Vec3 {
    let t = normal.dot(point - origin) / (direction.dot(normal) + PLANE_EPSILON);
    origin + direction * t
}

/// Grid coordinate of the world point, truncated toward zero.
///
/// Points within one cell left of or below the grid land on column or row 0;
/// anything further out is negative and every grid operation ignores it.
#[inline]
pub fn grid_coord(world: Vec3) -> IVec2 {
    IVec2::new(world.x as i32, world.y as i32)
}
