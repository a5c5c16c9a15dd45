//! Board representation and the jump rules of peg solitaire.
//!
//! A board is a rectangular grid of cells; cells outside the puzzle's
//! playable shape are `Void` and never change. Boards are immutable:
//! applying a jump produces a fresh board with exactly three cells
//! changed. In JSON a board is a grid of `-1` (out of bounds), `0`
//! (empty) and `1` (peg).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::SolverError;

/// The four axis-aligned jump directions, in generation order.
const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Outside the playable shape
    Void,
    /// Playable and unoccupied
    Empty,
    /// Playable and holding a peg
    Peg,
}

impl TryFrom<i8> for Cell {
    type Error = SolverError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Cell::Void),
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Peg),
            _ => Err(SolverError::InvalidCell { value }),
        }
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> i8 {
        match cell {
            Cell::Void => -1,
            Cell::Empty => 0,
            Cell::Peg => 1,
        }
    }
}

/// A legal move: `from` jumps over `over` and lands on `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: (i32, i32),
    pub over: (i32, i32),
    pub to: (i32, i32),
}

/// An immutable rectangular board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i8>>", into = "Vec<Vec<i8>>")]
pub struct Board {
    cells: Vec<Vec<Cell>>,
}

impl TryFrom<Vec<Vec<i8>>> for Board {
    type Error = SolverError;

    fn try_from(grid: Vec<Vec<i8>>) -> Result<Self, Self::Error> {
        let cells = grid
            .into_iter()
            .map(|row| row.into_iter().map(Cell::try_from).collect())
            .collect::<Result<Vec<Vec<Cell>>, _>>()?;
        Board::from_cells(cells)
    }
}

impl From<Board> for Vec<Vec<i8>> {
    fn from(board: Board) -> Self {
        board
            .cells
            .into_iter()
            .map(|row| row.into_iter().map(i8::from).collect())
            .collect()
    }
}

impl Board {
    /// Build a board, rejecting empty or ragged grids.
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, SolverError> {
        let expected = match cells.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(SolverError::EmptyBoard),
        };
        for (row, row_cells) in cells.iter().enumerate() {
            if row_cells.len() != expected {
                return Err(SolverError::RaggedBoard {
                    row,
                    len: row_cells.len(),
                    expected,
                });
            }
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    /// Get the cell at a position; off-grid coordinates behave as `Void`.
    pub fn cell(&self, row: i32, col: i32) -> Cell {
        if row < 0 || col < 0 {
            return Cell::Void;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(Cell::Void)
    }

    /// 1-based rank of a playable cell in row-major scan order.
    ///
    /// Returns `None` for `Void` cells and off-grid coordinates. Labels
    /// are recomputed on demand; the playable shape never changes within
    /// a run, so the label/coordinate mapping is stable across boards.
    pub fn slot_label(&self, row: i32, col: i32) -> Option<usize> {
        if self.cell(row, col) == Cell::Void {
            return None;
        }
        let mut label = 0;
        for (i, row_cells) in self.cells.iter().enumerate() {
            for (j, cell) in row_cells.iter().enumerate() {
                if *cell != Cell::Void {
                    label += 1;
                }
                if (i as i32, j as i32) == (row, col) {
                    return Some(label);
                }
            }
        }
        None
    }

    /// Inverse of [`slot_label`](Self::slot_label); scans until the label
    /// is found, `None` when it is out of range.
    pub fn coordinate_of(&self, label: usize) -> Option<(i32, i32)> {
        if label == 0 {
            return None;
        }
        let mut seen = 0;
        for (i, row_cells) in self.cells.iter().enumerate() {
            for (j, cell) in row_cells.iter().enumerate() {
                if *cell != Cell::Void {
                    seen += 1;
                    if seen == label {
                        return Some((i as i32, j as i32));
                    }
                }
            }
        }
        None
    }

    /// Sum of Euclidean distances from every peg to the grid center.
    ///
    /// Lower means the pegs sit closer together around the center.
    pub fn weighted_score(&self) -> f64 {
        let center_row = (self.rows() / 2) as i32;
        let center_col = (self.cols() / 2) as i32;

        let mut score = 0.0;
        for i in 0..self.rows() as i32 {
            for j in 0..self.cols() as i32 {
                if self.cell(i, j) == Cell::Peg {
                    score += euclidean_distance(i, j, center_row, center_col);
                }
            }
        }
        score
    }

    /// Count remaining pegs
    pub fn peg_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Peg)
            .count()
    }

    /// All legal jumps on this board, in row-major scan order with the
    /// four directions tried per peg.
    ///
    /// A jump is legal iff the adjacent cell holds a peg and the cell two
    /// steps away is empty; `Void` and off-grid cells disqualify.
    pub fn legal_jumps(&self) -> SmallVec<[Jump; 16]> {
        let mut jumps = SmallVec::new();
        for i in 0..self.rows() as i32 {
            for j in 0..self.cols() as i32 {
                for (di, dj) in DIRECTIONS {
                    if self.cell(i, j) == Cell::Peg
                        && self.cell(i + di, j + dj) == Cell::Peg
                        && self.cell(i + 2 * di, j + 2 * dj) == Cell::Empty
                    {
                        jumps.push(Jump {
                            from: (i, j),
                            over: (i + di, j + dj),
                            to: (i + 2 * di, j + 2 * dj),
                        });
                    }
                }
            }
        }
        jumps
    }

    /// Apply a jump, producing a new board with three cells changed.
    pub fn apply(&self, jump: &Jump) -> Board {
        let mut cells = self.cells.clone();
        cells[jump.from.0 as usize][jump.from.1 as usize] = Cell::Empty;
        cells[jump.over.0 as usize][jump.over.1 as usize] = Cell::Empty;
        cells[jump.to.0 as usize][jump.to.1 as usize] = Cell::Peg;
        Board { cells }
    }

    /// The standard 33-hole English cross with the center cell empty.
    pub fn english_cross() -> Board {
        Self::cross_shape(|row, col| {
            if (row, col) == (3, 3) {
                Cell::Empty
            } else {
                Cell::Peg
            }
        })
    }

    /// Goal for the English cross: a single peg at the center.
    pub fn english_cross_goal() -> Board {
        Self::cross_shape(|row, col| {
            if (row, col) == (3, 3) {
                Cell::Peg
            } else {
                Cell::Empty
            }
        })
    }

    /// Derive a goal of this board's shape with a single peg at the
    /// grid center and every other playable cell empty.
    pub fn center_goal(&self) -> Board {
        let center = ((self.rows() / 2) as i32, (self.cols() / 2) as i32);
        let cells = (0..self.rows() as i32)
            .map(|i| {
                (0..self.cols() as i32)
                    .map(|j| match self.cell(i, j) {
                        Cell::Void => Cell::Void,
                        _ if (i, j) == center => Cell::Peg,
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Board { cells }
    }

    fn cross_shape(fill: impl Fn(usize, usize) -> Cell) -> Board {
        let cells = (0..7)
            .map(|row| {
                (0..7)
                    .map(|col| {
                        if !(2..=4).contains(&row) && !(2..=4).contains(&col) {
                            Cell::Void
                        } else {
                            fill(row, col)
                        }
                    })
                    .collect()
            })
            .collect();
        Board { cells }
    }
}

fn euclidean_distance(r1: i32, c1: i32, r2: i32, c2: i32) -> f64 {
    let dr = (r1 - r2) as f64;
    let dc = (c1 - c2) as f64;
    (dr * dr + dc * dc).sqrt()
}
