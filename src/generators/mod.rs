use rand::{Rng, SeedableRng, rngs::StdRng};

mod recur_backtrack;

use recur_backtrack::recursive_backtrack;

use crate::maze::{Grid, MazeError};

/// Smallest width or height that still has an interior to carve.
pub const MIN_DIMENSION: u16 = 3;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generate a perfect maze of the given size. The same seed always yields the same grid.
pub fn generate(width: u16, height: u16, seed: Option<u64>) -> Result<Grid, MazeError> {
    generate_with_rng(width, height, &mut get_rng(seed))
}

/// Generate a perfect maze drawing all randomness from `rng`.
///
/// Carving only ever touches odd coordinates and the cells between them, so an even width or
/// height leaves the last interior column or row as wall. That is accepted and logged.
pub fn generate_with_rng<R: Rng + ?Sized>(
    width: u16,
    height: u16,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(MazeError::InvalidDimension { width, height });
    }
    if width % 2 == 0 || height % 2 == 0 {
        tracing::warn!(
            "[generator] even maze dimensions {}x{} leave an unused wall row/column",
            width,
            height
        );
    }

    let mut grid = Grid::new(width, height);
    recursive_backtrack(&mut grid, rng);
    Ok(grid)
}
