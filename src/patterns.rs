/// A named shape that can be stamped onto the grid.
/// Cells are (row, col) offsets from the pattern's top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "LWSS",
        cells: &[(0, 1), (0, 4), (1, 0), (2, 0), (2, 4), (3, 0), (3, 1), (3, 2), (3, 3)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
];

/// Position of a pattern in `PATTERNS` by name, ignoring case
pub fn pattern_index(name: &str) -> Option<usize> {
    PATTERNS.iter().position(|p| p.name.eq_ignore_ascii_case(name))
}

/// Index of the pattern after `idx`, wrapping around
pub fn next_index(idx: usize) -> usize {
    (idx + 1) % PATTERNS.len()
}

/// Index of the pattern before `idx`, wrapping around
pub fn prev_index(idx: usize) -> usize {
    (idx + PATTERNS.len() - 1) % PATTERNS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Grid;

    #[test]
    fn test_names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    fn find_pattern(name: &str) -> &'static Pattern {
        &PATTERNS[pattern_index(name).unwrap()]
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(pattern_index("glider").map(|i| PATTERNS[i].name), Some("Glider"));
        assert!(pattern_index("gosper").is_none());
    }

    #[test]
    fn test_index_cycling_wraps() {
        assert_eq!(next_index(PATTERNS.len() - 1), 0);
        assert_eq!(prev_index(0), PATTERNS.len() - 1);
        assert_eq!(prev_index(next_index(3)), 3);
    }

    #[test]
    fn test_pulsar_has_period_three() {
        let pulsar = find_pattern("Pulsar");

        let mut grid = Grid::new(17, 17);
        grid.stamp(pulsar, 2, 2);
        let start = grid.clone();

        let one = grid.advance();
        assert_ne!(one, start);
        let three = one.advance().advance();
        assert_eq!(three, start);
    }

    #[test]
    fn test_lwss_survives() {
        let lwss = find_pattern("LWSS");
        let mut grid = Grid::new(12, 20);
        grid.stamp(lwss, 4, 6);
        for _ in 0..4 {
            grid = grid.advance();
        }
        assert_eq!(grid.population(), lwss.cells.len());
    }
}
