//! Time-bounded tree search solver for peg solitaire.
//!
//! This crate explores the space of reachable board configurations
//! under five interchangeable strategies (breadth-first, depth-first,
//! randomized depth-first, heuristic depth-first and iterative
//! deepening), subject to a wall-clock budget, and reports the best
//! solution path found. When the budget runs out before an exact
//! solution is reached, the deepest dead-end seen so far is returned as
//! a best-effort fallback.

pub mod board;
pub mod error;
pub mod frontier;
pub mod report;
pub mod solver;
pub mod state;

// Re-export main types
pub use board::{Board, Cell, Jump};
pub use error::{SolverError, SolverResult};
pub use frontier::Frontier;
pub use report::{classify, render, solution_path, Classification};
pub use solver::{run, Algorithm, SearchResult};
pub use state::{GameState, Move};
