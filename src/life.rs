use crate::error::GridError;
use crate::patterns::Pattern;
use rand::Rng;

/// Probability that a cell starts alive in a randomized grid
pub const LIVE_PROBABILITY: f64 = 0.35;

/// Moore neighborhood offsets as (row, col)
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Next state of a single cell under the standard B3/S23 rule
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,
        (false, 3) => true,
        _ => false,
    }
}

/// Finite (non-toroidal) Game of Life grid.
///
/// Cells are stored row-major, so the grid always holds exactly
/// `rows * cols` cells. Anything outside the grid counts as dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid where each cell is independently alive with `LIVE_PROBABILITY`
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let cells = (0..rows * cols)
            .map(|_| rng.gen_bool(LIVE_PROBABILITY))
            .collect();
        Self { rows, cols, cells }
    }

    /// Build an empty or randomized grid using the thread-local RNG
    pub fn construct(rows: usize, cols: usize, randomize: bool) -> Self {
        if randomize {
            Self::random(rows, cols, &mut rand::thread_rng())
        } else {
            Self::new(rows, cols)
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Whether the cell is alive; positions off the grid are dead
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|idx| self.cells[idx])
    }

    /// Set a single cell
    #[cfg(test)]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(row, col).ok_or_else(|| self.out_of_bounds(row, col))?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a single cell between alive and dead
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let idx = self.index(row, col).ok_or_else(|| self.out_of_bounds(row, col))?;
        self.cells[idx] = !self.cells[idx];
        Ok(())
    }

    /// Count live cells in the Moore neighborhood, clipping at the edges
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if self.is_alive(nr, nc) {
                count += 1;
            }
        }
        count
    }

    /// Compute the next generation into a fresh grid.
    ///
    /// Every neighbor count reads from `self`, which is left untouched, so
    /// all cells update simultaneously.
    pub fn advance(&self) -> Grid {
        let cells = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| next_state(self.is_alive(row, col), self.live_neighbors(row, col)))
            .collect();

        Grid {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// Write a pattern with its top-left corner at (row, col).
    /// Cells that fall outside the grid are dropped; returns how many were written.
    pub fn stamp(&mut self, pattern: &Pattern, row: usize, col: usize) -> usize {
        let mut written = 0;
        for &(pr, pc) in pattern.cells {
            if let Some(idx) = self.index(row + pr, col + pc) {
                self.cells[idx] = true;
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{pattern_index, PATTERNS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows.len(), rows[0].len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set(r, c, true).unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn test_construct_empty_is_all_dead() {
        let grid = Grid::construct(20, 30, false);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 30);
        assert_eq!(grid.population(), 0);
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_zero_dimensions_give_empty_structure() {
        let grid = Grid::construct(0, 5, true);
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.advance(), grid);
    }

    #[test]
    fn test_random_live_fraction_near_expected() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut alive = 0;
        let mut total = 0;
        for _ in 0..20 {
            let grid = Grid::random(100, 100, &mut rng);
            alive += grid.population();
            total += grid.rows() * grid.cols();
        }
        let fraction = alive as f64 / total as f64;
        assert!((fraction - LIVE_PROBABILITY).abs() < 0.02, "fraction was {fraction}");
    }

    #[test]
    fn test_construct_randomized_live_fraction() {
        let grid = Grid::construct(100, 100, true);
        let fraction = grid.population() as f64 / 10_000.0;
        assert!((fraction - LIVE_PROBABILITY).abs() < 0.05, "fraction was {fraction}");
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.set(1, 1, true).is_ok());
        assert!(grid.set(2, 0, true).is_err());
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_rule_table() {
        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 2));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 8));
    }

    #[test]
    fn test_corner_neighbors_are_clipped() {
        let mut grid = Grid::new(4, 4);
        for row in 0..4 {
            for col in 0..4 {
                grid.set(row, col, true).unwrap();
            }
        }
        assert_eq!(grid.live_neighbors(0, 0), 3);
        assert_eq!(grid.live_neighbors(3, 3), 3);
        assert_eq!(grid.live_neighbors(0, 2), 5);
        assert_eq!(grid.live_neighbors(1, 1), 8);
    }

    #[test]
    fn test_no_wrap_across_edges() {
        let grid = grid_from(&[
            "...#",
            "....",
            "....",
            "#..#",
        ]);
        assert_eq!(grid.live_neighbors(0, 0), 0);
        assert_eq!(grid.live_neighbors(3, 2), 1);
    }

    #[test]
    fn test_advance_preserves_dimensions() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random(13, 29, &mut rng);
        let next = grid.advance();
        assert_eq!(next.rows(), 13);
        assert_eq!(next.cols(), 29);
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        let grid = Grid::new(10, 10);
        assert!(grid.advance().is_extinct());
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = grid_from(&[
            "....",
            ".##.",
            ".##.",
            "....",
        ]);
        assert_eq!(grid.advance(), grid);
    }

    #[test]
    fn test_block_in_corner_is_still_life() {
        let grid = grid_from(&[
            "##.",
            "##.",
            "...",
        ]);
        assert_eq!(grid.advance(), grid);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = grid_from(&[
            "...",
            ".#.",
            "...",
        ]);
        assert!(grid.advance().is_extinct());

        let pair = grid_from(&["##"]);
        assert!(pair.advance().is_extinct());
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let horizontal = grid_from(&[
            ".....",
            ".....",
            ".###.",
            ".....",
            ".....",
        ]);
        let vertical = grid_from(&[
            ".....",
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ]);
        assert_eq!(horizontal.advance(), vertical);
        assert_eq!(horizontal.advance().advance(), horizontal);
    }

    #[test]
    fn test_simultaneous_update() {
        // A sequential in-place update would let the first births feed later counts.
        let grid = grid_from(&[
            "#.#",
            "...",
            ".#.",
        ]);
        let next = grid.advance();
        assert_eq!(next, grid_from(&[
            "...",
            ".#.",
            "...",
        ]));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_glider_moves_diagonally() {
        let mut grid = Grid::new(10, 10);
        let glider = &PATTERNS[pattern_index("Glider").unwrap()];
        grid.stamp(glider, 1, 1);

        let mut moved = grid.clone();
        for _ in 0..4 {
            moved = moved.advance();
        }

        let mut expected = Grid::new(10, 10);
        expected.stamp(glider, 2, 2);
        assert_eq!(moved, expected);
    }

    #[test]
    fn test_toggle_flips_exactly_one_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = Grid::random(8, 8, &mut rng);
        let mut grid = original.clone();
        grid.toggle(4, 5).unwrap();

        for row in 0..8 {
            for col in 0..8 {
                if (row, col) == (4, 5) {
                    assert_ne!(grid.is_alive(row, col), original.is_alive(row, col));
                } else {
                    assert_eq!(grid.is_alive(row, col), original.is_alive(row, col));
                }
            }
        }

        grid.toggle(4, 5).unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_toggle_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(3, 4);
        assert_eq!(
            grid.toggle(3, 0),
            Err(GridError::OutOfBounds { row: 3, col: 0, rows: 3, cols: 4 })
        );
        assert!(grid.toggle(0, 4).is_err());
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut grid = Grid::new(3, 3);
        let block = &PATTERNS[pattern_index("Block").unwrap()];
        assert_eq!(grid.stamp(block, 2, 2), 1);
        assert!(grid.is_alive(2, 2));
        assert_eq!(grid.population(), 1);
    }
}
