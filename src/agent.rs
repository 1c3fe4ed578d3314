use std::sync::Arc;

use crate::{
    brains::{Brain, BrainError, BrainKind},
    maze::{Coord, Grid},
};

/// Binds a brain to a start/goal pair and records every cell it steps on.
pub struct Agent {
    brain: Box<dyn Brain>,
    start: Coord,
    /// `None` means the bottom-right interior cell of whatever grid the agent is started on.
    goal: Option<Coord>,
    /// Goal the brain was actually reset with.
    resolved_goal: Option<Coord>,
    path: Vec<Coord>,
    done: bool,
}

impl Agent {
    pub fn new(brain: Box<dyn Brain>, start: Coord, goal: Option<Coord>) -> Self {
        Agent {
            brain,
            start,
            goal,
            resolved_goal: None,
            path: Vec::new(),
            done: false,
        }
    }

    /// Default goal for a grid: its bottom-right interior cell.
    pub fn default_goal(grid: &Grid) -> Coord {
        (
            grid.width().saturating_sub(2),
            grid.height().saturating_sub(2),
        )
    }

    /// Reset the brain on `grid` and seed the path with the start cell.
    pub fn start(&mut self, grid: Arc<Grid>) -> Result<(), BrainError> {
        let goal = self.goal.unwrap_or_else(|| Agent::default_goal(&grid));
        self.brain.reset(grid, self.start, goal)?;
        self.resolved_goal = Some(goal);
        self.path = vec![self.start];
        self.done = false;
        Ok(())
    }

    /// Advance the brain by one move, appending it to the path.
    /// Returns `None` once the brain is done, and on every call after that.
    pub fn step(&mut self) -> Result<Option<Coord>, BrainError> {
        if self.done {
            return Ok(None);
        }
        match self.brain.next_move()? {
            Some(coord) => {
                self.path.push(coord);
                Ok(Some(coord))
            }
            None => {
                self.done = true;
                tracing::debug!(
                    "[agent] {} finished after {} steps",
                    self.brain.kind(),
                    self.steps()
                );
                Ok(None)
            }
        }
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Number of moves taken so far, not counting the start cell.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whether the last cell on the path is the goal.
    pub fn reached_goal(&self) -> bool {
        self.resolved_goal.is_some() && self.path.last() == self.resolved_goal.as_ref()
    }

    pub fn kind(&self) -> BrainKind {
        self.brain.kind()
    }

    pub fn start_cell(&self) -> Coord {
        self.start
    }

    /// The goal in use since the last [`Agent::start`].
    pub fn goal(&self) -> Option<Coord> {
        self.resolved_goal
    }
}
