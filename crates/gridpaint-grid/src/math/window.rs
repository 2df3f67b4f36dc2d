use std::ops::Range;

use glam::{IVec2, Vec2};

use super::Grid2;

/// Axis-aligned window of grid coordinates, clamped to `[0, width] × [0, height]`.
///
/// Bounds are inclusive as requested; [`axis_range`] widens them to cover the
/// partially visible cells on the far edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VisibleRect {
    pub bottom_left: IVec2,
    pub top_right:   IVec2,
}

impl VisibleRect {
    pub fn new(bottom_left: IVec2, top_right: IVec2) -> Self {
        Self { bottom_left, top_right }
    }

    /// The whole grid.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(IVec2::ZERO, IVec2::new(width as i32, height as i32))
    }

    /// Smallest window containing `points`, floored to cell coordinates and
    /// clamped to the grid. Non-finite points are skipped; if none remain the
    /// whole grid is returned.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>, width: u32, height: u32) -> Self {
        let mut bounds: Option<(Vec2, Vec2)> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            bounds = Some(match bounds {
                None => (p, p),
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
            });
        }

        let Some((lo, hi)) = bounds else {
            return Self::full(width, height);
        };

        let max = Vec2::new(width as f32, height as f32);
        let lo = lo.floor().clamp(Vec2::ZERO, max);
        let hi = hi.floor().clamp(Vec2::ZERO, max);
        Self::new(lo.as_ivec2(), hi.as_ivec2())
    }

    /// Number of cells `flatten_windowed` will visit for a grid of this size.
    pub fn cell_count(&self, width: u32, height: u32) -> usize {
        let xs = axis_range(width, self.bottom_left.x, self.top_right.x);
        let ys = axis_range(height, self.bottom_left.y, self.top_right.y);
        xs.len() * ys.len()
    }
}

/// Index range along one axis for the window `[low, high]`.
///
/// A high bound at or past `dim` covers the rest of the axis; otherwise the
/// cell at `high` is included. Negative low bounds clamp to zero. Inverted
/// bounds give an empty range.
pub fn axis_range(dim: u32, low: i32, high: i32) -> Range<usize> {
    let dim = dim as i64;
    let (low, high) = (low as i64, high as i64);

    let end = if high >= dim { dim } else { (high + 1).max(0) };
    let start = low.clamp(0, dim).min(end);
    start as usize..end as usize
}

/// Lazily visits the window, outer index `x`, inner index `y`.
pub fn windowed<T>(
    grid: &Grid2<T>,
    bottom_left: IVec2,
    top_right: IVec2,
) -> impl Iterator<Item = (IVec2, &T)> + '_ {
    let xs = axis_range(grid.width(), bottom_left.x, top_right.x);
    let ys = axis_range(grid.height(), bottom_left.y, top_right.y);

    xs.flat_map(move |x| {
        let column = &grid.column(x as u32)[ys.clone()];
        column
            .iter()
            .zip(ys.clone())
            .map(move |(v, y)| (IVec2::new(x as i32, y as i32), v))
    })
}

/// Copies the window into a flat vector, outer index `x`, inner index `y`.
///
/// The window may extend past the grid; it is clamped, never an error.
pub fn flatten_windowed<T: Clone>(grid: &Grid2<T>, bottom_left: IVec2, top_right: IVec2) -> Vec<T> {
    let xs = axis_range(grid.width(), bottom_left.x, top_right.x);
    let ys = axis_range(grid.height(), bottom_left.y, top_right.y);

    let mut out = Vec::with_capacity(xs.len() * ys.len());
    for x in xs {
        out.extend_from_slice(&grid.column(x as u32)[ys.clone()]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> Grid2<i32> {
        Grid2::from_fn(w, h, |p| p.x * 100 + p.y)
    }

    // ── axis_range ────────────────────────────────────────────────────────

    #[test]
    fn high_bound_inside_includes_that_cell() {
        assert_eq!(axis_range(10, 2, 5), 2..6);
    }

    #[test]
    fn high_bound_at_or_past_dim_covers_rest() {
        assert_eq!(axis_range(10, 0, 10), 0..10);
        assert_eq!(axis_range(10, 3, 99), 3..10);
    }

    #[test]
    fn negative_bounds_clamp() {
        assert_eq!(axis_range(10, -5, 2), 0..3);
        assert_eq!(axis_range(10, -5, -3), 0..0);
    }

    #[test]
    fn inverted_bounds_are_empty() {
        assert!(axis_range(10, 8, 3).is_empty());
        assert!(axis_range(10, 12, 20).is_empty());
    }

    // ── flatten_windowed ──────────────────────────────────────────────────

    #[test]
    fn full_window_matches_indexed_access() {
        let g = numbered(4, 3);
        let flat = flatten_windowed(&g, IVec2::ZERO, IVec2::new(4, 3));
        assert_eq!(flat.len(), 12);

        let mut i = 0;
        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(Some(&flat[i]), g.get(IVec2::new(x, y)));
                i += 1;
            }
        }
    }

    #[test]
    fn oversized_window_equals_full_window() {
        let g = numbered(6, 5);
        let full = flatten_windowed(&g, IVec2::ZERO, IVec2::new(6, 5));
        let wide = flatten_windowed(&g, IVec2::new(-5, -5), IVec2::new(11, 10));
        assert_eq!(full, wide);
    }

    #[test]
    fn sub_window_is_row_major_by_x() {
        let g = numbered(10, 10);
        let flat = flatten_windowed(&g, IVec2::new(2, 3), IVec2::new(3, 4));
        assert_eq!(flat, vec![203, 204, 303, 304]);
    }

    #[test]
    fn empty_window_yields_nothing() {
        let g = numbered(5, 5);
        assert!(flatten_windowed(&g, IVec2::new(4, 4), IVec2::new(1, 1)).is_empty());
    }

    #[test]
    fn windowed_agrees_with_flatten() {
        let g = numbered(7, 7);
        let (bl, tr) = (IVec2::new(1, 2), IVec2::new(4, 9));
        let lazy: Vec<i32> = windowed(&g, bl, tr).map(|(_, v)| *v).collect();
        assert_eq!(lazy, flatten_windowed(&g, bl, tr));
        assert!(windowed(&g, bl, tr).all(|(p, v)| g.get(p) == Some(v)));
    }

    // ── VisibleRect ───────────────────────────────────────────────────────

    #[test]
    fn enclosing_floors_and_clamps() {
        let pts = [Vec2::new(-3.5, 2.2), Vec2::new(7.9, 12.0)];
        let r = VisibleRect::enclosing(pts, 10, 10);
        assert_eq!(r, VisibleRect::new(IVec2::new(0, 2), IVec2::new(7, 10)));
    }

    #[test]
    fn enclosing_without_finite_points_is_full() {
        let r = VisibleRect::enclosing([Vec2::new(f32::NAN, 0.0)], 8, 9);
        assert_eq!(r, VisibleRect::full(8, 9));
    }

    #[test]
    fn cell_count_matches_flatten_len() {
        let g = numbered(10, 10);
        let r = VisibleRect::new(IVec2::new(2, 2), IVec2::new(5, 10));
        assert_eq!(r.cell_count(10, 10), flatten_windowed(&g, r.bottom_left, r.top_right).len());
    }
}
