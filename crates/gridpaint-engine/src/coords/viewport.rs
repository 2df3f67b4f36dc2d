/// Viewport size in logical pixels.
///
/// Pointer positions are reported in the same space, so picking unprojects
/// against this size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Falls back to 1.0 for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_default_window() {
        assert!((Viewport::new(800.0, 600.0).aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_is_invalid() {
        let vp = Viewport::new(800.0, 0.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.aspect(), 1.0);
    }

    #[test]
    fn nan_is_invalid() {
        assert!(!Viewport::new(f32::NAN, 10.0).is_valid());
    }
}
