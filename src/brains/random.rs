use std::sync::Arc;

use rand::{rngs::StdRng, seq::SliceRandom};

use super::{Brain, BrainError, BrainKind, check_endpoints, walker::StackWalker};
use crate::{
    generators::get_rng,
    maze::{Coord, Direction, Grid},
};

/// Random depth-first walk: directions are shuffled before every move.
pub struct RandomBrain {
    rng: StdRng,
    walker: Option<StackWalker>,
}

impl RandomBrain {
    /// A `None` seed draws from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        RandomBrain {
            rng: get_rng(seed),
            walker: None,
        }
    }
}

impl Brain for RandomBrain {
    fn reset(&mut self, grid: Arc<Grid>, start: Coord, goal: Coord) -> Result<(), BrainError> {
        check_endpoints(&grid, start, goal)?;
        self.walker = Some(StackWalker::new(self.kind(), grid, start, goal));
        Ok(())
    }

    fn next_move(&mut self) -> Result<Option<Coord>, BrainError> {
        let walker = self.walker.as_mut().ok_or(BrainError::NotReset)?;
        let mut order = Direction::ALL;
        order.shuffle(&mut self.rng);
        Ok(walker.step_in_order(&order))
    }

    fn kind(&self) -> BrainKind {
        BrainKind::Random
    }
}
