use crate::life::Grid;

/// Braille character rendering for large grids.
/// Each Braille character represents a 2x4 block of cells (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    /// Whether the cursor cell falls inside this character
    pub has_cursor: bool,
}

/// Render the visible part of the grid to Braille characters.
///
/// `origin` is the top-left grid cell as (row, col). Characters with no live
/// cells are skipped unless they hold the cursor.
pub fn render_to_braille(
    grid: &Grid,
    origin: (usize, usize),
    cursor: Option<(usize, usize)>,
    canvas_width: u16,
    canvas_height: u16,
) -> Vec<BrailleCell> {
    let mut cells = Vec::new();

    for cy in 0..canvas_height {
        for cx in 0..canvas_width {
            let base_row = origin.0 + cy as usize * 4;
            let base_col = origin.1 + cx as usize * 2;
            if base_row >= grid.rows() || base_col >= grid.cols() {
                continue;
            }

            let mut pattern: u8 = 0;
            for dx in 0..2 {
                for dy in 0..4 {
                    if grid.is_alive(base_row + dy, base_col + dx) {
                        pattern |= BRAILLE_DOTS[dx][dy];
                    }
                }
            }

            let has_cursor = cursor.is_some_and(|(row, col)| {
                (base_row..base_row + 4).contains(&row) && (base_col..base_col + 2).contains(&col)
            });

            if pattern != 0 || has_cursor {
                cells.push(BrailleCell {
                    x: cx,
                    y: cy,
                    char: braille_char(pattern),
                    has_cursor,
                });
            }
        }
    }

    cells
}

fn braille_char(pattern: u8) -> char {
    char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ')
}
