//! Error types for the solver.
//!
//! These cover the fail-fast preconditions: malformed board input,
//! mismatched goal dimensions and unknown algorithm names. A search that
//! runs out of time is not an error; it returns its best candidate.

use thiserror::Error;

/// Errors produced while building or running a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Board has no rows or no columns
    #[error("board must have at least one row and one column")]
    EmptyBoard,

    /// Board rows are not all the same length
    #[error("board is not rectangular: row {row} has {len} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A grid value other than -1, 0 or 1
    #[error("invalid cell value {value} (expected -1 for out of bounds, 0 for empty, 1 for peg)")]
    InvalidCell { value: i8 },

    /// Goal configuration does not match the board's dimensions
    #[error("goal dimensions {goal_rows}x{goal_cols} do not match board dimensions {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        goal_rows: usize,
        goal_cols: usize,
    },

    /// Algorithm selector does not name a known variant
    #[error("unknown algorithm `{0}` (expected one of: bfs, dfs, ids, random-dfs, heuristic-dfs)")]
    UnknownAlgorithm(String),
}

/// Result type alias for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
