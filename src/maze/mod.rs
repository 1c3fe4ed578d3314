pub mod cell;
mod grid;

pub use cell::Cell;
pub use grid::Grid;

/// Grid coordinate as `(x, y)`.
pub type Coord = (u16, u16);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze dimensions {width}x{height} are too small, both must be at least 3")]
    InvalidDimension { width: u16, height: u16 },

    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u16, y: u16 },

    #[error("invalid grid text: {0}")]
    Parse(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Canonical direction order. Brains that do not shuffle always try neighbors in this order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The coordinate `distance` cells away in this direction, or `None` if it would leave the
    /// representable coordinate range. Callers still have to check grid bounds.
    pub fn step_by(self, coord: Coord, distance: u16) -> Option<Coord> {
        let (x, y) = coord;
        match self {
            Direction::Left => Some((x.checked_sub(distance)?, y)),
            Direction::Right => Some((x.checked_add(distance)?, y)),
            Direction::Up => Some((x, y.checked_sub(distance)?)),
            Direction::Down => Some((x, y.checked_add(distance)?)),
        }
    }

    pub fn step(self, coord: Coord) -> Option<Coord> {
        self.step_by(coord, 1)
    }
}

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Left.step((0, 3)), None);
        assert_eq!(Direction::Up.step((3, 0)), None);
        assert_eq!(Direction::Right.step((u16::MAX, 0)), None);
        assert_eq!(Direction::Down.step_by((1, 1), 2), Some((1, 3)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((1, 1), (3, 3)), 4);
        assert_eq!(manhattan((5, 2), (1, 2)), 4);
        assert_eq!(manhattan((4, 4), (4, 4)), 0);
    }
}
