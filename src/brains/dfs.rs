use std::sync::Arc;

use super::{Brain, BrainError, BrainKind, check_endpoints, walker::StackWalker};
use crate::maze::{Coord, Direction, Grid};

/// Deterministic depth-first walk, always trying left, right, up, down in that order.
#[derive(Default)]
pub struct DfsBrain {
    walker: Option<StackWalker>,
}

impl DfsBrain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Brain for DfsBrain {
    fn reset(&mut self, grid: Arc<Grid>, start: Coord, goal: Coord) -> Result<(), BrainError> {
        check_endpoints(&grid, start, goal)?;
        self.walker = Some(StackWalker::new(self.kind(), grid, start, goal));
        Ok(())
    }

    fn next_move(&mut self) -> Result<Option<Coord>, BrainError> {
        let walker = self.walker.as_mut().ok_or(BrainError::NotReset)?;
        Ok(walker.step_in_order(&Direction::ALL))
    }

    fn kind(&self) -> BrainKind {
        BrainKind::Dfs
    }
}
