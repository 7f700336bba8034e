//! Evolution engine for Conway's Game of Life.
//!
//! Game of Life standard rules (B3/S23):
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
//!
//! The grid does not wrap: neighbors past an edge are treated as dead.

use crate::grid::Grid;

/// Count the live cells among the 8 neighbors of `(x, y)`.
/// Neighbor coordinates outside the grid count as dead.
pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let x_start = x.saturating_sub(1);
    let y_start = y.saturating_sub(1);
    let x_end = (x + 1).min(grid.width() - 1);
    let y_end = (y + 1).min(grid.height() - 1);

    let mut count = 0;
    for ny in y_start..=y_end {
        for nx in x_start..=x_end {
            // Skip the cell itself
            if nx == x && ny == y {
                continue;
            }
            if grid.get(nx, ny) {
                count += 1;
            }
        }
    }
    count
}

/// State of a cell in the next generation.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Write the generation after `current` into `next`.
///
/// Every cell is computed from the frozen `current` grid; `next` is fully
/// overwritten. Both grids must have the same dimensions.
pub fn step(current: &Grid, next: &mut Grid) {
    assert_eq!(
        (current.width(), current.height()),
        (next.width(), next.height()),
        "generation buffers differ in size"
    );

    for y in 0..current.height() {
        for x in 0..current.width() {
            let alive = next_state(current.get(x, y), count_neighbors(current, x, y));
            next.set(x, y, alive);
        }
    }
}

/// Allocate and return the generation after `grid`.
pub fn evolve(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.width(), grid.height());
    step(grid, &mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Pattern;

    fn grid_with(pattern: Pattern, origin: (usize, usize)) -> Grid {
        let mut grid = Grid::new(10, 10);
        grid.seed(pattern, origin);
        grid
    }

    fn sorted_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid.live_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn rule_table_is_b3_s23() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn block_is_a_fixed_point() {
        let block = grid_with(Pattern::Block, (4, 4));
        let once = evolve(&block);
        assert_eq!(once, block);
        assert_eq!(evolve(&once), block);
    }

    #[test]
    fn blinker_rotates_then_returns() {
        let vertical = grid_with(Pattern::Blinker, (5, 4));
        let horizontal = evolve(&vertical);
        assert_eq!(sorted_cells(&horizontal), vec![(4, 5), (5, 5), (6, 5)]);
        assert_eq!(evolve(&horizontal), vertical);
    }

    #[test]
    fn glider_translates_diagonally_every_four_generations() {
        let start = grid_with(Pattern::Glider, (2, 2));
        let mut grid = start.clone();
        for _ in 0..4 {
            grid = evolve(&grid);
            assert_eq!(grid.live_count(), 5);
        }
        let shifted: Vec<_> = sorted_cells(&start)
            .into_iter()
            .map(|(x, y)| (x + 1, y + 1))
            .collect();
        assert_eq!(sorted_cells(&grid), shifted);
    }

    #[test]
    fn corner_counts_at_most_three() {
        let mut grid = Grid::new(6, 5);
        for y in 0..5 {
            for x in 0..6 {
                grid.set(x, y, true);
            }
        }
        assert_eq!(count_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_neighbors(&grid, 5, 4), 3);
        assert_eq!(count_neighbors(&grid, 5, 0), 3);
        assert_eq!(count_neighbors(&grid, 3, 0), 5);
        assert_eq!(count_neighbors(&grid, 3, 2), 8);
    }

    #[test]
    fn edges_do_not_wrap() {
        let mut grid = Grid::new(5, 5);
        // A column on the far right must not feed the left edge.
        for y in 1..4 {
            grid.set(4, y, true);
        }
        assert_eq!(count_neighbors(&grid, 0, 2), 0);
        assert_eq!(count_neighbors(&grid, 3, 2), 3);

        let next = evolve(&grid);
        assert_eq!(sorted_cells(&next), vec![(3, 2), (4, 2)]);
    }

    #[test]
    fn step_overwrites_stale_next_buffer() {
        let current = Grid::new(4, 4);
        let mut next = Grid::new(4, 4);
        next.set(1, 1, true);
        step(&current, &mut next);
        assert_eq!(next.live_count(), 0);
    }

    #[test]
    fn step_is_deterministic() {
        let mut grid = grid_with(Pattern::Glider, (0, 0));
        grid.seed(Pattern::Blinker, (7, 3));
        assert_eq!(evolve(&grid), evolve(&grid));
    }

    #[test]
    #[should_panic(expected = "differ in size")]
    fn step_rejects_mismatched_buffers() {
        let current = Grid::new(4, 4);
        let mut next = Grid::new(4, 5);
        step(&current, &mut next);
    }
}
