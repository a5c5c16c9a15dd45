//! Frontier disciplines for the traversal loop.
//!
//! The frontier is the ordered collection of not-yet-expanded nodes. Two
//! genuine disciplines back the five algorithms: a LIFO stack for the
//! depth-first family and a FIFO queue for breadth-first. Ordering among
//! siblings comes from sorting each child batch once before insertion;
//! the frontier itself is never re-sorted.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::state::GameState;

/// An ordered container of pending search nodes
#[derive(Debug)]
pub enum Frontier {
    /// Last in, first out
    Stack(Vec<Rc<GameState>>),
    /// First in, first out
    Queue(VecDeque<Rc<GameState>>),
}

impl Frontier {
    pub fn stack() -> Frontier {
        Frontier::Stack(Vec::new())
    }

    pub fn queue() -> Frontier {
        Frontier::Queue(VecDeque::new())
    }

    pub fn add(&mut self, node: Rc<GameState>) {
        match self {
            Frontier::Stack(nodes) => nodes.push(node),
            Frontier::Queue(nodes) => nodes.push_back(node),
        }
    }

    pub fn remove(&mut self) -> Option<Rc<GameState>> {
        match self {
            Frontier::Stack(nodes) => nodes.pop(),
            Frontier::Queue(nodes) => nodes.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Stack(nodes) => nodes.len(),
            Frontier::Queue(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn node(cells: &[i8]) -> Rc<GameState> {
        GameState::root(Board::try_from(vec![cells.to_vec()]).unwrap())
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut frontier = Frontier::stack();
        frontier.add(node(&[1, 0]));
        frontier.add(node(&[0, 1]));
        assert_eq!(frontier.len(), 2);

        let first = frontier.remove().unwrap();
        assert_eq!(first.board().peg_count(), 1);
        assert_eq!(Vec::<Vec<i8>>::from(first.board().clone()), vec![vec![0, 1]]);
        assert_eq!(
            Vec::<Vec<i8>>::from(frontier.remove().unwrap().board().clone()),
            vec![vec![1, 0]]
        );
        assert!(frontier.remove().is_none());
    }

    #[test]
    fn test_queue_is_fifo_across_generations() {
        // Enqueue two "depth 1" nodes, then a "depth 2" node while the
        // first is already consumed; the remaining depth-1 node must
        // still come out before the depth-2 one.
        let mut frontier = Frontier::queue();
        frontier.add(node(&[1, 1, 0]));
        frontier.add(node(&[0, 1, 1]));

        let first = frontier.remove().unwrap();
        assert_eq!(Vec::<Vec<i8>>::from(first.board().clone()), vec![vec![1, 1, 0]]);

        frontier.add(node(&[1, 0, 1]));
        assert_eq!(
            Vec::<Vec<i8>>::from(frontier.remove().unwrap().board().clone()),
            vec![vec![0, 1, 1]]
        );
        assert_eq!(
            Vec::<Vec<i8>>::from(frontier.remove().unwrap().board().clone()),
            vec![vec![1, 0, 1]]
        );
        assert!(frontier.is_empty());
    }
}
