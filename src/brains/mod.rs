//! Stepwise pathfinding strategies.
//!
//! Every brain is driven the same way: [`Brain::reset`] hands it a read-only grid plus start and
//! goal, then each [`Brain::next_move`] call advances it by one discrete move. A brain that has
//! nothing left to do returns `Ok(None)`, and keeps returning it on every later call.

use std::sync::Arc;

use rand::Rng;

mod astar;
mod dfs;
mod heuristic;
mod random;
mod walker;

pub use astar::AStarBrain;
pub use dfs::DfsBrain;
pub use heuristic::HeuristicBrain;
pub use random::RandomBrain;

use crate::maze::{Coord, Grid, MazeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrainError {
    #[error("next_move called before reset")]
    NotReset,

    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub trait Brain: Send {
    /// Drop all traversal state and prepare to walk from `start` to `goal` on `grid`.
    fn reset(&mut self, grid: Arc<Grid>, start: Coord, goal: Coord) -> Result<(), BrainError>;

    /// The next cell this brain moves to, or `None` once it is done (goal reached or search
    /// space exhausted). The start cell itself is never returned.
    fn next_move(&mut self) -> Result<Option<Coord>, BrainError>;

    fn kind(&self) -> BrainKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrainKind {
    Random,
    AStar,
    Heuristic,
    Dfs,
}

impl BrainKind {
    /// All brains, in the order they race.
    pub const ALL: [BrainKind; 4] = [
        BrainKind::Random,
        BrainKind::AStar,
        BrainKind::Heuristic,
        BrainKind::Dfs,
    ];

    /// Build a fresh brain of this kind. Randomized brains get their own seed drawn from `rng`.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Box<dyn Brain> {
        match self {
            BrainKind::Random => Box::new(RandomBrain::new(Some(rng.random()))),
            BrainKind::AStar => Box::new(AStarBrain::new()),
            BrainKind::Heuristic => Box::new(HeuristicBrain::new()),
            BrainKind::Dfs => Box::new(DfsBrain::new()),
        }
    }
}

impl std::fmt::Display for BrainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrainKind::Random => write!(f, "Random"),
            BrainKind::AStar => write!(f, "A*"),
            BrainKind::Heuristic => write!(f, "Heuristic"),
            BrainKind::Dfs => write!(f, "DFS"),
        }
    }
}

/// Reject endpoints that lie outside the grid.
fn check_endpoints(grid: &Grid, start: Coord, goal: Coord) -> Result<(), BrainError> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate, get_rng};

    fn open_5x5() -> Arc<Grid> {
        Arc::new(Grid::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap())
    }

    /// Drive a brain until it reports `None`, with a hard cap so a broken brain fails instead of
    /// hanging the test run.
    fn run_to_end(brain: &mut dyn Brain) -> Vec<Coord> {
        let mut moves = Vec::new();
        while let Some(coord) = brain.next_move().unwrap() {
            moves.push(coord);
            assert!(moves.len() < 100_000, "{} did not terminate", brain.kind());
        }
        moves
    }

    #[test]
    fn test_next_move_before_reset_fails() {
        let mut rng = get_rng(Some(0));
        for kind in BrainKind::ALL {
            let mut brain = kind.build(&mut rng);
            assert_eq!(brain.next_move(), Err(BrainError::NotReset), "{kind}");
            assert_eq!(brain.kind(), kind);
        }
    }

    #[test]
    fn test_reset_rejects_out_of_bounds_endpoints() {
        let mut rng = get_rng(Some(0));
        for kind in BrainKind::ALL {
            let mut brain = kind.build(&mut rng);
            assert_eq!(
                brain.reset(open_5x5(), (1, 1), (9, 3)),
                Err(BrainError::Maze(MazeError::OutOfBounds { x: 9, y: 3 }))
            );
        }
    }

    #[test]
    fn test_start_equals_goal_is_done_immediately() {
        let mut rng = get_rng(Some(0));
        for kind in BrainKind::ALL {
            let mut brain = kind.build(&mut rng);
            brain.reset(open_5x5(), (2, 2), (2, 2)).unwrap();
            assert_eq!(brain.next_move(), Ok(None), "{kind}");
            assert_eq!(brain.next_move(), Ok(None), "{kind}");
        }
    }

    #[test]
    fn test_every_brain_reaches_goal_and_stays_done() {
        let grid = Arc::new(generate(21, 21, Some(5)).unwrap());
        let goal = (19, 19);
        let mut rng = get_rng(Some(5));
        for kind in BrainKind::ALL {
            let mut brain = kind.build(&mut rng);
            brain.reset(grid.clone(), (1, 1), goal).unwrap();
            let moves = run_to_end(brain.as_mut());
            assert_eq!(moves.last(), Some(&goal), "{kind}");
            for _ in 0..3 {
                assert_eq!(brain.next_move(), Ok(None), "{kind}");
            }
        }
    }

    #[test]
    fn test_sealed_goal_exhausts_every_brain() {
        let grid = Arc::new(
            Grid::from_ascii(&[
                "#######", //
                "#...#.#", //
                "#.#.###", //
                "#...#.#", //
                "#######",
            ])
            .unwrap(),
        );
        let mut rng = get_rng(Some(9));
        for kind in BrainKind::ALL {
            let mut brain = kind.build(&mut rng);
            brain.reset(grid.clone(), (1, 1), (5, 1)).unwrap();
            let moves = run_to_end(brain.as_mut());
            assert!(!moves.contains(&(5, 1)), "{kind}");
            assert_eq!(brain.next_move(), Ok(None), "{kind}");
        }
    }

    #[test]
    fn test_reset_starts_a_fresh_traversal() {
        let grid = Arc::new(generate(15, 15, Some(8)).unwrap());
        let mut rng = get_rng(Some(8));
        for kind in [BrainKind::AStar, BrainKind::Heuristic, BrainKind::Dfs] {
            let mut brain = kind.build(&mut rng);
            brain.reset(grid.clone(), (1, 1), (13, 13)).unwrap();
            let first = run_to_end(brain.as_mut());
            brain.reset(grid.clone(), (1, 1), (13, 13)).unwrap();
            let second = run_to_end(brain.as_mut());
            assert_eq!(first, second, "{kind}");
        }
    }

    #[test]
    fn test_display_names() {
        let names = BrainKind::ALL.map(|k| k.to_string());
        assert_eq!(names, ["Random", "A*", "Heuristic", "DFS"]);
    }
}
