use std::{collections::HashSet, sync::Arc};

use super::BrainKind;
use crate::maze::{Coord, Direction, Grid};

/// Depth-first walk state shared by the stack-based brains.
///
/// `stack` is the current path from the start. Moving forward pushes a freshly visited cell,
/// a dead end pops one and reports the new top, so every backtrack move lands on a cell that is
/// already on the path.
pub(super) struct StackWalker {
    kind: BrainKind,
    grid: Arc<Grid>,
    goal: Coord,
    visited: HashSet<Coord>,
    stack: Vec<Coord>,
}

impl StackWalker {
    pub(super) fn new(kind: BrainKind, grid: Arc<Grid>, start: Coord, goal: Coord) -> Self {
        StackWalker {
            kind,
            grid,
            goal,
            visited: HashSet::from([start]),
            stack: vec![start],
        }
    }

    pub(super) fn goal(&self) -> Coord {
        self.goal
    }

    /// Open, unvisited neighbors of `from`, tried in `order`.
    fn candidates(&self, from: Coord, order: &[Direction]) -> Vec<Coord> {
        order
            .iter()
            .filter_map(|dir| dir.step(from))
            .filter(|&c| self.grid.is_open(c) && !self.visited.contains(&c))
            .collect()
    }

    /// Advance one move. `pick` chooses among the candidates (listed in `order`); if it returns
    /// `None` or there are no candidates, the walker backtracks instead.
    pub(super) fn step_with<F>(&mut self, order: &[Direction], pick: F) -> Option<Coord>
    where
        F: FnOnce(&[Coord]) -> Option<Coord>,
    {
        // An empty stack means the reachable region is exhausted
        let &current = self.stack.last()?;
        if current == self.goal {
            return None;
        }

        let candidates = self.candidates(current, order);
        match pick(&candidates) {
            Some(next) => {
                self.visited.insert(next);
                self.stack.push(next);
                if next == self.goal {
                    tracing::debug!(
                        "[{}] goal {:?} reached, {} cells visited",
                        self.kind,
                        next,
                        self.visited.len()
                    );
                }
                Some(next)
            }
            None => {
                self.stack.pop();
                let back = self.stack.last().copied();
                if back.is_none() {
                    tracing::debug!(
                        "[{}] search space exhausted after visiting {} cells",
                        self.kind,
                        self.visited.len()
                    );
                }
                back
            }
        }
    }

    /// Advance into the first candidate in `order`, or backtrack.
    pub(super) fn step_in_order(&mut self, order: &[Direction]) -> Option<Coord> {
        self.step_with(order, |candidates| candidates.first().copied())
    }

    #[cfg(test)]
    pub(super) fn stack(&self) -> &[Coord] {
        &self.stack
    }
}
