use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
};

use mazerace::{
    BrainKind, Coord, Grid,
    brains::{AStarBrain, Brain, DfsBrain, HeuristicBrain, RandomBrain},
    generators::generate,
    maze::manhattan,
};
use proptest::{prelude::*, sample::Index};

/// Arbitrary grids with walls scattered anywhere, cycles included.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (3usize..16, 3usize..16).prop_flat_map(|(w, h)| {
        proptest::collection::vec(proptest::bool::weighted(0.7), w * h).prop_map(move |open| {
            let rows = (0..h)
                .map(|y| {
                    (0..w)
                        .map(|x| if open[y * w + x] { '.' } else { '#' })
                        .collect::<String>()
                })
                .collect::<Vec<_>>();
            Grid::from_ascii(&rows).unwrap()
        })
    })
}

/// Ground-truth distances by breadth-first search over open cells.
fn bfs_distances(grid: &Grid, start: Coord) -> HashMap<Coord, usize> {
    let mut dist = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for next in grid.neighbors(current) {
            if grid.is_open(next) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn pick_open(grid: &Grid, start: Index, goal: Index) -> Option<(Coord, Coord)> {
    let open = grid.open_cells().collect::<Vec<_>>();
    if open.is_empty() {
        return None;
    }
    Some((*start.get(&open), *goal.get(&open)))
}

fn all_brains(seed: u64) -> Vec<Box<dyn Brain>> {
    vec![
        Box::new(RandomBrain::new(Some(seed))),
        Box::new(AStarBrain::new()),
        Box::new(HeuristicBrain::new()),
        Box::new(DfsBrain::new()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_mazes_are_perfect(width in 3u16..40, height in 3u16..40, seed in any::<u64>()) {
        let grid = generate(width, height, Some(seed)).unwrap();

        for x in 0..width {
            prop_assert!(!grid.is_open((x, 0)));
            prop_assert!(!grid.is_open((x, height - 1)));
        }
        for y in 0..height {
            prop_assert!(!grid.is_open((0, y)));
            prop_assert!(!grid.is_open((width - 1, y)));
        }

        let open = grid.open_cells().collect::<Vec<_>>();
        let edges = open
            .iter()
            .map(|&(x, y)| {
                usize::from(grid.is_open((x + 1, y))) + usize::from(grid.is_open((x, y + 1)))
            })
            .sum::<usize>();
        prop_assert_eq!(edges, open.len() - 1);

        let reachable = bfs_distances(&grid, (1, 1));
        prop_assert_eq!(reachable.len(), open.len());
    }

    #[test]
    fn generation_is_deterministic(width in 3u16..40, height in 3u16..40, seed in any::<u64>()) {
        let a = generate(width, height, Some(seed)).unwrap();
        let b = generate(width, height, Some(seed)).unwrap();
        prop_assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn astar_is_optimal(grid in arb_grid(), start in any::<Index>(), goal in any::<Index>()) {
        let Some((start, goal)) = pick_open(&grid, start, goal) else {
            return Ok(());
        };
        let expected = bfs_distances(&grid, start).get(&goal).copied();

        let mut brain = AStarBrain::new();
        brain.reset(Arc::new(grid.clone()), start, goal).unwrap();
        let moves = std::iter::from_fn(|| brain.next_move().unwrap()).collect::<Vec<_>>();

        match expected {
            Some(distance) => {
                prop_assert_eq!(moves.len(), distance);
                if distance > 0 {
                    prop_assert_eq!(moves.last(), Some(&goal));
                }
            }
            None => prop_assert!(moves.is_empty()),
        }
        prop_assert_eq!(brain.next_move(), Ok(None));
    }

    #[test]
    fn every_brain_terminates_and_stays_done(
        grid in arb_grid(),
        start in any::<Index>(),
        goal in any::<Index>(),
        seed in any::<u64>(),
    ) {
        let Some((start, goal)) = pick_open(&grid, start, goal) else {
            return Ok(());
        };
        let grid = Arc::new(grid);
        // Each cell is entered once and left once at most
        let limit = 2 * grid.open_cells().count() + 1;

        for mut brain in all_brains(seed) {
            brain.reset(grid.clone(), start, goal).unwrap();
            let mut moves = 0;
            while brain.next_move().unwrap().is_some() {
                moves += 1;
                prop_assert!(moves <= limit, "{} did not terminate", brain.kind());
            }
            for _ in 0..3 {
                prop_assert_eq!(brain.next_move(), Ok(None));
            }
        }
    }

    #[test]
    fn backtracking_returns_to_the_current_path(
        grid in arb_grid(),
        start in any::<Index>(),
        goal in any::<Index>(),
        seed in any::<u64>(),
    ) {
        let Some((start, goal)) = pick_open(&grid, start, goal) else {
            return Ok(());
        };
        let reachable = bfs_distances(&grid, start).contains_key(&goal);
        let grid = Arc::new(grid);

        for mut brain in all_brains(seed) {
            if brain.kind() == BrainKind::AStar {
                continue;
            }
            brain.reset(grid.clone(), start, goal).unwrap();

            let mut path = vec![start];
            let mut seen = HashSet::from([start]);
            let mut last = None;
            while let Some(coord) = brain.next_move().unwrap() {
                if seen.contains(&coord) {
                    // A revisit is always a step back to the previous cell on the path
                    prop_assert!(path.len() >= 2);
                    prop_assert_eq!(path[path.len() - 2], coord);
                    path.pop();
                } else {
                    prop_assert!(grid.is_open(coord));
                    prop_assert_eq!(manhattan(*path.last().unwrap(), coord), 1);
                    seen.insert(coord);
                    path.push(coord);
                }
                last = Some(coord);
            }

            if reachable && start != goal {
                prop_assert_eq!(last, Some(goal), "{} missed a reachable goal", brain.kind());
            }
        }
    }
}

#[test]
fn open_interior_scenario() {
    let grid = Arc::new(Grid::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap());
    let open = grid.open_cells().count();

    let mut astar = AStarBrain::new();
    astar.reset(grid.clone(), (1, 1), (3, 3)).unwrap();
    let astar_moves = std::iter::from_fn(|| astar.next_move().unwrap()).count();
    assert_eq!(astar_moves, 4);

    let mut dfs = DfsBrain::new();
    dfs.reset(grid.clone(), (1, 1), (3, 3)).unwrap();
    let dfs_moves = std::iter::from_fn(|| dfs.next_move().unwrap()).collect::<Vec<_>>();
    assert!(dfs_moves.len() >= 4);
    assert!(dfs_moves.len() <= open);
    assert_eq!(dfs_moves.last(), Some(&(3, 3)));
}
