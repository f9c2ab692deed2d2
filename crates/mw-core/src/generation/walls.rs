//! Wall placement around carved floor

use crate::error::GridError;
use crate::map::{Cell, Grid, symmetry};

/// Neighbor offsets, checked in this order
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Turn every empty orthogonal neighbor of a floor cell into a mirrored wall.
///
/// Scans `x` in `[0, width - 1)` and `y` in `[0, height - 1)`; carving never
/// reaches the last row or column. Neighbors outside the grid are skipped.
/// Returns the number of neighbors walled (mirror writes excluded).
///
/// Running it again on its own output writes nothing.
pub fn build_walls(grid: &mut Grid) -> Result<usize, GridError> {
    let mut walled = 0;

    for x in 0..grid.width() as i32 - 1 {
        for y in 0..grid.height() as i32 - 1 {
            if grid.get(x, y)? != Cell::Floor {
                continue;
            }
            for (dx, dy) in NEIGHBORS {
                let (nx, ny) = (x + dx, y + dy);
                if grid.cell(nx, ny) == Some(Cell::Empty) {
                    symmetry::set_symmetric(grid, nx, ny, Cell::Wall)?;
                    walled += 1;
                }
            }
        }
    }

    Ok(walled)
}
