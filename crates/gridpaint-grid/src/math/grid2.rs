use glam::IVec2;

/// Dense `width × height` array addressed by `(x, y)`.
///
/// Storage is one flat `Vec` with each column contiguous (`index = x * height + y`),
/// so a fixed-`x` run over `y` is a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2<T> {
    width:  u32,
    height: u32,
    cells:  Vec<T>,
}

impl<T: Clone> Grid2<T> {
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid2<T> {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(IVec2) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                cells.push(f(IVec2::new(x, y)));
            }
        }
        Self { width, height, cells }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, at: IVec2) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as u32) < self.width && (at.y as u32) < self.height
    }

    #[inline]
    fn index(&self, at: IVec2) -> Option<usize> {
        self.contains(at)
            .then(|| at.x as usize * self.height as usize + at.y as usize)
    }

    pub fn get(&self, at: IVec2) -> Option<&T> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, at: IVec2) -> Option<&mut T> {
        self.index(at).map(move |i| &mut self.cells[i])
    }

    /// All elements with the given `x`, ordered by `y`. Empty when `x` is out of range.
    pub fn column(&self, x: u32) -> &[T] {
        if x >= self.width {
            return &[];
        }
        let start = x as usize * self.height as usize;
        &self.cells[start..start + self.height as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_layout() {
        let g = Grid2::from_fn(3, 2, |p| p.x * 10 + p.y);
        assert_eq!(g.column(0), &[0, 1]);
        assert_eq!(g.column(2), &[20, 21]);
        assert_eq!(g.get(IVec2::new(1, 1)), Some(&11));
    }

    #[test]
    fn out_of_bounds_access_is_none() {
        let mut g = Grid2::filled(4, 4, 0u8);
        assert!(g.get(IVec2::new(-1, 0)).is_none());
        assert!(g.get(IVec2::new(0, 4)).is_none());
        assert!(g.get_mut(IVec2::new(4, 0)).is_none());
        assert!(g.column(4).is_empty());
    }

    #[test]
    fn get_mut_writes_through() {
        let mut g = Grid2::filled(2, 2, false);
        if let Some(v) = g.get_mut(IVec2::new(1, 0)) {
            *v = true;
        }
        assert_eq!(g.column(1), &[true, false]);
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut g = Grid2::from_fn(2, 3, |p| p.x + p.y);
        g.fill(7);
        assert!(g.column(0).iter().chain(g.column(1)).all(|&v| v == 7));
        assert_eq!(g.len(), 6);
    }
}
