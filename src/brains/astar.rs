use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
    sync::Arc,
};

use super::{Brain, BrainError, BrainKind, check_endpoints};
use crate::maze::{Coord, Grid, manhattan};

enum State {
    /// Reset, search not yet run.
    Searching {
        grid: Arc<Grid>,
        start: Coord,
        goal: Coord,
    },
    /// Optimal path found. `cursor` indexes the next cell to hand out; index 0 is the start.
    Replaying { path: Vec<Coord>, cursor: usize },
    /// Path fully replayed, or goal unreachable.
    Exhausted,
}

/// A* over the grid with a Manhattan heuristic.
///
/// The whole search runs inside the first `next_move` after a reset; the resulting optimal path
/// is then handed out one cell per call.
#[derive(Default)]
pub struct AStarBrain {
    state: Option<State>,
}

impl AStarBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full optimal path (start included) once the search has run.
    pub fn planned_path(&self) -> Option<&[Coord]> {
        match &self.state {
            Some(State::Replaying { path, .. }) => Some(path),
            _ => None,
        }
    }
}

impl Brain for AStarBrain {
    fn reset(&mut self, grid: Arc<Grid>, start: Coord, goal: Coord) -> Result<(), BrainError> {
        check_endpoints(&grid, start, goal)?;
        self.state = Some(State::Searching { grid, start, goal });
        Ok(())
    }

    fn next_move(&mut self) -> Result<Option<Coord>, BrainError> {
        let state = self.state.as_mut().ok_or(BrainError::NotReset)?;

        if let State::Searching { grid, start, goal } = state {
            let next_state = match search(&**grid, *start, *goal) {
                Some(path) => {
                    tracing::debug!("[A*] optimal path of {} steps found", path.len() - 1);
                    State::Replaying { path, cursor: 1 }
                }
                None => {
                    tracing::debug!("[A*] goal {:?} unreachable from {:?}", goal, start);
                    State::Exhausted
                }
            };
            *state = next_state;
        }

        let next = match state {
            State::Replaying { path, cursor } => {
                let next = path.get(*cursor).copied();
                *cursor += 1;
                next
            }
            _ => None,
        };
        if next.is_none() {
            *state = State::Exhausted;
        }
        Ok(next)
    }

    fn kind(&self) -> BrainKind {
        BrainKind::AStar
    }
}

/// Shortest path from `start` to `goal`, both included, or `None` if the goal is unreachable.
///
/// Unit step cost and a consistent heuristic mean a cell is final the first time it is popped.
/// Frontier ties on `f` go to the earliest inserted entry.
fn search(grid: &Grid, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
    // Reverse turns the max-heap into a min-heap
    let mut open: BinaryHeap<Reverse<(u32, u64, Coord)>> = BinaryHeap::new();
    let mut g_score: HashMap<Coord, u32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut closed: HashSet<Coord> = HashSet::new();
    let mut seq: u64 = 0;

    open.push(Reverse((manhattan(start, goal), seq, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        // Skip stale entries
        if !closed.insert(current) {
            continue;
        }

        if current == goal {
            return Some(reconstruct_path(&came_from, current));
        }

        let tentative_g = g_score[&current] + 1;
        for neighbor in grid.neighbors(current) {
            if !grid[neighbor].is_open() || closed.contains(&neighbor) {
                continue;
            }
            let is_cheaper = g_score
                .get(&neighbor)
                .is_none_or(|&existing| tentative_g < existing);
            if is_cheaper {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                seq += 1;
                open.push(Reverse((
                    tentative_g + manhattan(neighbor, goal),
                    seq,
                    neighbor,
                )));
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Coord, Coord>, mut current: Coord) -> Vec<Coord> {
    let mut path = vec![current];
    while let Some(&parent) = came_from.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
