use std::sync::Arc;

use super::{Brain, BrainError, BrainKind, check_endpoints, walker::StackWalker};
use crate::maze::{Coord, Direction, Grid, manhattan};

/// Greedy walk: always step to the unvisited neighbor closest to the goal (Manhattan distance),
/// backtracking on dead ends. Ties go to the first neighbor in left, right, up, down order.
///
/// This is not globally optimal and can dead-end repeatedly.
#[derive(Default)]
pub struct HeuristicBrain {
    walker: Option<StackWalker>,
}

impl HeuristicBrain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Brain for HeuristicBrain {
    fn reset(&mut self, grid: Arc<Grid>, start: Coord, goal: Coord) -> Result<(), BrainError> {
        check_endpoints(&grid, start, goal)?;
        self.walker = Some(StackWalker::new(self.kind(), grid, start, goal));
        Ok(())
    }

    fn next_move(&mut self) -> Result<Option<Coord>, BrainError> {
        let walker = self.walker.as_mut().ok_or(BrainError::NotReset)?;
        let goal = walker.goal();
        Ok(walker.step_with(&Direction::ALL, |candidates| {
            candidates
                .iter()
                .copied()
                .min_by_key(|&c| manhattan(c, goal))
        }))
    }

    fn kind(&self) -> BrainKind {
        BrainKind::Heuristic
    }
}
