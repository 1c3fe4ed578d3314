use rand::Rng;

use crate::maze::{Cell, Coord, Direction, Grid};

/// Carve a perfect maze into an all-wall grid with an iterative recursive backtracker.
///
/// Nodes live on odd coordinates and edges join nodes two cells apart. Carving an edge opens the
/// target node and the wall cell between them. The walk always starts at (1, 1).
pub(super) fn recursive_backtrack<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let start: Coord = (1, 1);
    grid.set(start, Cell::Open);

    // The stack keeps only open node cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = get_unvisited_neighbors(cell, grid);

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        let between = ((cell.0 + neighbor.0) / 2, (cell.1 + neighbor.1) / 2);
        grid.set(between, Cell::Open);
        grid.set(neighbor, Cell::Open);
        stack.push(neighbor);
    }
}

/// Get unvisited neighbors of a node.
/// A neighbor is a cell two steps away in the cardinal directions that is still a wall and lies
/// strictly inside the border.
fn get_unvisited_neighbors(cell: Coord, grid: &Grid) -> Vec<Coord> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| dir.step_by(cell, 2))
        .filter(|&(nx, ny)| {
            (1..=grid.width() - 2).contains(&nx)
                && (1..=grid.height() - 2).contains(&ny)
                && grid[(nx, ny)] == Cell::Wall
        })
        .collect()
}
