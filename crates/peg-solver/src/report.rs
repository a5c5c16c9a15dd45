//! Solution path reconstruction and reporting.
//!
//! Walks the final node's ancestor chain back to the root, classifies
//! the outcome and renders the move sequence as text. Each board along
//! the path is printed under the move that transforms it into its
//! successor, optionally with the jumping cells marked `*` and the
//! removed peg marked `x`.

use std::fmt::Write;
use std::rc::Rc;

use crate::board::{Board, Cell};
use crate::solver::SearchResult;
use crate::state::{GameState, Move};

/// How a finished search is to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The time limit elapsed before any move was made
    NoSolution,
    /// The final board matches the goal configuration
    Optimal,
    /// A dead end short of the goal
    SubOptimal { remaining_pegs: usize },
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Classification::NoSolution => f.write_str("No solution found (time limit reached)"),
            Classification::Optimal => f.write_str("Optimal solution found"),
            Classification::SubOptimal { remaining_pegs } => write!(
                f,
                "Sub-optimal solution found with {remaining_pegs} remaining pegs"
            ),
        }
    }
}

/// Classify a search's final node against the goal.
pub fn classify(final_node: &GameState, goal: &Board) -> Classification {
    if final_node.depth() == 0 {
        Classification::NoSolution
    } else if final_node.is_goal(goal) {
        Classification::Optimal
    } else {
        Classification::SubOptimal {
            remaining_pegs: final_node.board().peg_count(),
        }
    }
}

/// The ancestor chain of `final_node`, root first.
///
/// The returned path always holds `final_node.depth() + 1` nodes; each
/// node after the first carries the move connecting it to its
/// predecessor.
pub fn solution_path(final_node: &Rc<GameState>) -> Vec<Rc<GameState>> {
    let mut nodes = Vec::with_capacity(final_node.depth() + 1);
    let mut cursor = Some(Rc::clone(final_node));
    while let Some(node) = cursor {
        cursor = node.parent().cloned();
        nodes.push(node);
    }
    nodes.reverse();
    nodes
}

/// Render a finished search as a text report.
pub fn render(result: &SearchResult, goal: &Board, show_boards: bool, marks: bool) -> String {
    let classification = classify(&result.final_node, goal);

    let mut out = String::new();
    let _ = writeln!(out, "Message: {classification}");
    if classification == Classification::NoSolution {
        return out;
    }

    let _ = writeln!(out, "Expanded nodes: {}", result.expanded_nodes);
    let _ = writeln!(
        out,
        "Max nodes stored in frontier: {}",
        result.max_frontier_size
    );
    let _ = writeln!(out, "Time spent: {} ms", result.time_elapsed_ms);

    if show_boards {
        let _ = writeln!(out, "\n=== Board states until the solution ===");
        let path = solution_path(&result.final_node);
        for (node, next) in path.iter().zip(path.iter().skip(1).map(Some).chain([None])) {
            match next.and_then(|n| n.last_move()) {
                Some(mv) => {
                    let _ = writeln!(out, "\nMove #{}: {}", node.depth() + 1, mv);
                }
                None => out.push('\n'),
            }
            let highlight = next
                .filter(|_| marks)
                .and_then(|n| Some((n.last_move()?, n.removed_peg()?)));
            push_board(&mut out, node.board(), highlight);
        }
    }
    out
}

/// Append one board, a cell and a space per column.
fn push_board(out: &mut String, board: &Board, highlight: Option<(Move, (i32, i32))>) {
    for i in 0..board.rows() as i32 {
        for j in 0..board.cols() as i32 {
            let glyph = match highlight {
                Some((_, removed)) if removed == (i, j) => 'x',
                Some((mv, _))
                    if board
                        .slot_label(i, j)
                        .is_some_and(|label| label == mv.from || label == mv.to) =>
                {
                    '*'
                }
                _ => match board.cell(i, j) {
                    Cell::Void => ' ',
                    Cell::Empty => '0',
                    Cell::Peg => '1',
                },
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
}
