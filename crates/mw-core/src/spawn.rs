//! Helpers for placing and moving an avatar on a finished map

use crate::map::{Cell, Grid};
use crate::rng::GenRng;
use crate::walker::Direction;

/// Coordinates of every floor cell, row by row from the bottom
pub fn floor_cells(grid: &Grid) -> Vec<(i32, i32)> {
    grid.iter()
        .filter(|(_, _, cell)| *cell == Cell::Floor)
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Pick a random floor cell, or `None` if there is no floor
pub fn random_floor(grid: &Grid, rng: &mut GenRng) -> Option<(i32, i32)> {
    rng.choose(&floor_cells(grid)).copied()
}

/// One orthogonal step from `pos`.
///
/// The target is clamped to the grid; the move is refused (returning `pos`)
/// when the target is a wall.
pub fn try_step(grid: &Grid, pos: (i32, i32), dir: Direction) -> (i32, i32) {
    let (dx, dy) = dir.delta();
    let target = (
        (pos.0 + dx).clamp(0, grid.width() as i32 - 1),
        (pos.1 + dy).clamp(0, grid.height() as i32 - 1),
    );
    if grid.is_passable(target.0, target.1) {
        target
    } else {
        pos
    }
}
