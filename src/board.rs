//! Mine board derivation.
//! First pass copies each grid cell and flags mines (`count > 0`); a second
//! pass over the finished board counts mine flags among the up-to-8
//! in-bounds neighbors. Adjacency must see final flags, so the two passes
//! never interleave.

use crate::grid::Grid;

/// One board square: the underlying day plus its derived minesweeper state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardCell {
    pub date: Option<String>,
    pub count: u32,
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

/// Column-major mine board derived from a grid: `cells[col][row]`, row 0 at
/// the top. Derived fresh on every render call, never cached.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub cells: Vec<Vec<BoardCell>>,
}

impl Board {
    pub fn cols(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

/// Derives the mine board for a grid. `count > 0` is the only
/// activity-to-mine rule. Short columns are squared off with empty cells
/// so the board is rectangular.
pub fn build_board(grid: &Grid) -> Board {
    let rows = grid.weeks.iter().map(Vec::len).max().unwrap_or(0);

    let mut cells: Vec<Vec<BoardCell>> = grid
        .weeks
        .iter()
        .map(|week| {
            (0..rows)
                .map(|r| match week.get(r) {
                    Some(cell) => BoardCell {
                        date: cell.date.clone(),
                        count: cell.count,
                        is_mine: cell.count > 0,
                        adjacent_mines: 0,
                    },
                    None => BoardCell::default(),
                })
                .collect()
        })
        .collect();

    // Snapshot the finished flags before computing any adjacency.
    let mines: Vec<Vec<bool>> = cells
        .iter()
        .map(|column| column.iter().map(|cell| cell.is_mine).collect())
        .collect();

    for (c, column) in cells.iter_mut().enumerate() {
        for (r, cell) in column.iter_mut().enumerate() {
            cell.adjacent_mines = count_adjacent(&mines, c, r);
        }
    }

    Board { cells }
}

/// Counts mine flags among the 8 neighbors of `(col, row)`. Neighbors
/// outside the board simply do not contribute; there is no wraparound.
fn count_adjacent(mines: &[Vec<bool>], col: usize, row: usize) -> u8 {
    let mut adjacent = 0;
    for dc in [-1i64, 0, 1] {
        for dr in [-1i64, 0, 1] {
            if dc == 0 && dr == 0 {
                continue;
            }
            let (nc, nr) = (col as i64 + dc, row as i64 + dr);
            if nc < 0 || nr < 0 {
                continue;
            }
            let hit = mines
                .get(nc as usize)
                .is_some_and(|column| column.get(nr as usize).copied().unwrap_or(false));
            if hit {
                adjacent += 1;
            }
        }
    }
    adjacent
}
