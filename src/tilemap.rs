use rayon::prelude::*;

/// A dense 2D grid stored row-major (row = y, column = x).
///
/// The grid does not wrap: coordinates outside `0..width` / `0..height`
/// have no cell, and neighbor queries simply leave them out.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Tilemap<T> {
    /// Build a map from row-major data. Returns `None` if the length does
    /// not match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Build a map by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    /// `(rows, columns)`, matching the row-major layout.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// In-bounds 8-connected neighbors, scanned row by row from the top-left.
    pub fn neighbors_8(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);

        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if self.in_bounds(nx, ny) {
                    result.push((nx as usize, ny as usize));
                }
            }
        }

        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| (idx % width, idx / width, val))
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| (idx % width, idx / width, val))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// Rows as mutable slices for parallel per-row work. Rows never alias,
    /// so each worker only ever sees its own row.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, T>
    where
        T: Send,
    {
        self.data.par_chunks_mut(self.width.max(1))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tilemap<U> {
        Tilemap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl Tilemap<f64> {
    /// Minimum and maximum values, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut values = self.data.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let map = Tilemap::from_fn(3, 2, |x, y| y * 10 + x);
        assert_eq!(map.shape(), (2, 3));
        let rows: Vec<&[usize]> = map.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 2][..], &[10, 11, 12][..]]);
        assert_eq!(*map.get(2, 1), 12);
    }

    #[test]
    fn test_neighbors_do_not_wrap() {
        let map = Tilemap::new_with(4, 4, 0u8);
        assert_eq!(map.neighbors_8(0, 0), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(map.neighbors_8(3, 3).len(), 3);
        assert_eq!(map.neighbors_8(1, 1).len(), 8);
        assert_eq!(map.neighbors_8(3, 1).len(), 5);
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Tilemap::from_vec(2, 2, vec![0; 3]).is_none());
        assert!(Tilemap::from_vec(2, 2, vec![0; 4]).is_some());
    }

    #[test]
    fn test_min_max() {
        let map = Tilemap::from_vec(2, 2, vec![0.5, -1.0, 3.0, 0.0]).unwrap();
        assert_eq!(map.min_max(), Some((-1.0, 3.0)));
        assert_eq!(Tilemap::<f64>::new(0, 0).min_max(), None);
    }

    #[test]
    fn test_par_rows_mut_writes_each_row() {
        let mut map = Tilemap::new_with(5, 3, 0usize);
        map.par_rows_mut().enumerate().for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = y * 100 + x;
            }
        });
        assert_eq!(*map.get(4, 2), 204);
        assert_eq!(*map.get(0, 1), 100);
    }
}
