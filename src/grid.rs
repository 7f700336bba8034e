use crate::patterns::Pattern;
use rand::Rng;

/// Fixed-size rectangular field of cells stored row-major in one flat buffer.
///
/// Coordinates are `(x, y)` with `x` in `0..width` and `y` in `0..height`.
/// The grid never wraps and is never resized after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of `(x, y)`. The caller guarantees the coordinate is in bounds.
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside {}x{}", self.width, self.height);
        y * self.width + x
    }

    /// Inverse of [`Grid::index`].
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Liveness of `(x, y)`.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside {}x{}", self.width, self.height);
        self.cells[y * self.width + x]
    }

    /// Overwrite a single cell.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside {}x{}", self.width, self.height);
        self.cells[y * self.width + x] = alive;
    }

    /// Flip a cell and return its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let alive = !self.get(x, y);
        self.set(x, y, alive);
        alive
    }

    /// Bring every cell of `pattern` to life relative to `origin`.
    /// Cells that fall outside the grid are skipped.
    pub fn seed(&mut self, pattern: Pattern, origin: (usize, usize)) {
        for (x, y) in pattern.cells(origin) {
            if self.in_bounds(x, y) {
                self.set(x, y, true);
            }
        }
    }

    /// OR random liveness into the square of half-width `radius` around
    /// `(cx, cy)`, clipped to the grid. Live cells are never cleared.
    ///
    /// Returns the flat indices of cells that were dead and are now alive.
    pub fn random_fill<R: Rng + ?Sized>(
        &mut self,
        cx: usize,
        cy: usize,
        radius: usize,
        probability: f64,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut born = Vec::new();
        if self.cells.is_empty() {
            return born;
        }
        let probability = probability.clamp(0.0, 1.0);

        let x_end = cx.saturating_add(radius).min(self.width - 1);
        let y_end = cy.saturating_add(radius).min(self.height - 1);
        for y in cy.saturating_sub(radius)..=y_end {
            for x in cx.saturating_sub(radius)..=x_end {
                let idx = y * self.width + x;
                if rng.random_bool(probability) && !self.cells[idx] {
                    self.cells[idx] = true;
                    born.push(idx);
                }
            }
        }
        born
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(7, 4);
        assert_eq!(grid.cells().len(), 28);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn set_and_get_use_row_major_layout() {
        let mut grid = Grid::new(5, 3);
        grid.set(4, 1, true);
        assert!(grid.get(4, 1));
        assert!(grid.cells()[9]);
        assert_eq!(grid.index(4, 1), 9);
        assert_eq!(grid.coords(9), (4, 1));
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds_panics() {
        let grid = Grid::new(5, 3);
        grid.get(5, 0);
    }

    #[test]
    fn toggle_twice_restores_cell() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 2, true);
        for (x, y) in [(0, 0), (2, 2)] {
            let before = grid.get(x, y);
            assert_eq!(grid.toggle(x, y), !before);
            grid.toggle(x, y);
            assert_eq!(grid.get(x, y), before);
        }
    }

    #[test]
    fn seed_skips_cells_past_the_edge() {
        let mut grid = Grid::new(3, 3);
        grid.seed(Pattern::Block, (2, 2));
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn random_fill_never_clears_live_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(20, 20);
        for (x, y) in [(10, 10), (8, 12), (12, 8), (5, 5)] {
            grid.set(x, y, true);
        }
        let before = grid.clone();

        let born = grid.random_fill(10, 10, 3, 0.5, &mut rng);

        for (x, y) in before.live_cells() {
            assert!(grid.get(x, y));
        }
        for &idx in &born {
            assert!(!before.cells()[idx]);
            assert!(grid.cells()[idx]);
        }
        assert_eq!(grid.live_count(), before.live_count() + born.len());
    }

    #[test]
    fn random_fill_stays_inside_square() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(20, 20);
        grid.random_fill(10, 10, 2, 1.0, &mut rng);
        assert_eq!(grid.live_count(), 25);
        for (x, y) in grid.live_cells() {
            assert!((8..=12).contains(&x) && (8..=12).contains(&y));
        }
    }

    #[test]
    fn random_fill_clips_at_corner() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(10, 10);
        let born = grid.random_fill(0, 0, 2, 1.0, &mut rng);
        assert_eq!(born.len(), 9);
        let born = grid.random_fill(9, 9, 100, 0.0, &mut rng);
        assert!(born.is_empty());
    }
}
