use super::{Coord, Direction, MazeError, cell::Cell};

/// Fixed-size wall/open matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Creates a grid of the given size filled with walls.
    pub fn new(width: u16, height: u16) -> Self {
        let data = vec![Cell::Wall; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Builds a grid from rows of text, `#` for walls, `.` or space for open cells and `*` for
    /// marked cells. All rows must have the same non-zero length.
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let height = u16::try_from(rows.len())
            .map_err(|_| MazeError::Parse(format!("too many rows: {}", rows.len())))?;
        let width = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);
        let width = u16::try_from(width)
            .map_err(|_| MazeError::Parse(format!("row too long: {width}")))?;
        if width == 0 || height == 0 {
            return Err(MazeError::Parse("grid must not be empty".to_string()));
        }

        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width as usize {
                return Err(MazeError::Parse(format!(
                    "row {y} has length {}, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::from_ascii(c)
                    .ok_or_else(|| MazeError::Parse(format!("unknown cell {c:?} at ({x}, {y})")))?;
                grid.set((x as u16, y as u16), cell);
            }
        }
        Ok(grid)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_boundary(&self, x: u16, y: u16) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Checks if the given coordinate is within the bounds of the grid.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Like [`Grid::in_bounds`], but as a `Result` for callers that must reject bad input.
    pub fn check_bounds(&self, coord: Coord) -> Result<Coord, MazeError> {
        if self.in_bounds(coord) {
            Ok(coord)
        } else {
            Err(MazeError::OutOfBounds {
                x: coord.0,
                y: coord.1,
            })
        }
    }

    /// Whether the coordinate is inside the grid and not a wall.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self[coord].is_open()
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    pub fn set(&mut self, coord: (u16, u16), cell: Cell) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = cell;
    }

    /// Row-major view over all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Iterates over the coordinates of all non-wall cells, row by row.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&c| self[c].is_open())
    }

    /// In-bounds 4-neighbors of `coord`, in [`Direction::ALL`] order. Walls are included.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| dir.step(coord))
            .filter(move |&c| self.in_bounds(c))
    }

    /// Marks every open cell of `path` so renderers can show the trail.
    /// Walls are left untouched.
    pub fn mark_path(&mut self, path: &[Coord]) {
        for &coord in path {
            if self.is_open(coord) {
                self.set(coord, Cell::Marked);
            }
        }
    }

    /// Plain-text form, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            out.extend((0..self.width).map(|x| self[(x, y)].ascii()));
            out.push('\n');
        }
        out
    }
}

impl std::ops::Index<(u16, u16)> for Grid {
    type Output = Cell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}
