//! Search nodes over immutable board snapshots.
//!
//! A `GameState` owns its board and holds an upward-only `Rc` handle to
//! its parent, used solely for path reconstruction. Children are
//! generated lazily, one per legal jump, each with a fresh board clone.
//! Structurally identical boards reached along different move orders are
//! NOT deduplicated; the same configuration may be expanded more than
//! once. That inflates expansion counts and is a documented limitation
//! of the search, not something to paper over here.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::board::Board;

/// A move between two slot labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} => {}", self.from, self.to)
    }
}

/// One node of the search tree
#[derive(Debug)]
pub struct GameState {
    board: Board,
    last_move: Option<Move>,
    removed_peg: Option<(i32, i32)>,
    parent: Option<Rc<GameState>>,
    depth: usize,
}

impl GameState {
    /// Root node for an initial configuration.
    pub fn root(board: Board) -> Rc<GameState> {
        Rc::new(GameState {
            board,
            last_move: None,
            removed_peg: None,
            parent: None,
            depth: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The move that produced this state; `None` only for the root.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Coordinate of the peg removed by [`last_move`](Self::last_move).
    pub fn removed_peg(&self) -> Option<(i32, i32)> {
        self.removed_peg
    }

    /// Slot label of the removed peg.
    pub fn removed_peg_label(&self) -> Option<usize> {
        self.removed_peg
            .and_then(|(row, col)| self.board.slot_label(row, col))
    }

    pub fn parent(&self) -> Option<&Rc<GameState>> {
        self.parent.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when no legal jump remains.
    pub fn is_terminal(&self) -> bool {
        self.board.legal_jumps().is_empty()
    }

    /// True when the board is cell-wise identical to the goal.
    pub fn is_goal(&self, goal: &Board) -> bool {
        self.board == *goal
    }

    /// Materialize one child per legal jump, in jump scan order.
    pub fn children(parent: &Rc<GameState>) -> SmallVec<[Rc<GameState>; 16]> {
        let board = &parent.board;
        board
            .legal_jumps()
            .iter()
            .map(|jump| {
                let last_move = Move {
                    from: board
                        .slot_label(jump.from.0, jump.from.1)
                        .expect("jump origin is a playable cell"),
                    to: board
                        .slot_label(jump.to.0, jump.to.1)
                        .expect("jump destination is a playable cell"),
                };
                Rc::new(GameState {
                    board: board.apply(jump),
                    last_move: Some(last_move),
                    removed_peg: Some(jump.over),
                    parent: Some(Rc::clone(parent)),
                    depth: parent.depth + 1,
                })
            })
            .collect()
    }

    /// Slot label a child's jump landed on; 0 for the root.
    pub(crate) fn destination_label(&self) -> usize {
        self.last_move.map_or(0, |mv| mv.to)
    }
}
