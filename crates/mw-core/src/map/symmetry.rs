//! Left-right mirroring
//!
//! Floor and wall writes are copied to the column `width - 1 - x` on the same
//! row. After carving, [`validate`] reports any pair of columns that disagree.

use log::warn;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::grid::Grid;
use crate::error::GridError;

/// Copy `cell` to the mirror of `(x, y)`.
///
/// The caller is expected to have written `(x, y)` itself. Skipped when the
/// mirrored coordinate falls outside the grid.
pub fn place_symmetric(grid: &mut Grid, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
    let mx = grid.mirrored_x(x);
    if !grid.in_bounds(mx, y) {
        return Ok(());
    }
    grid.set(mx, y, cell)
}

/// Write `(x, y)` and its mirror
pub fn set_symmetric(grid: &mut Grid, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
    grid.set(x, y, cell)?;
    place_symmetric(grid, x, y, cell)
}

/// A pair of mirrored cells holding different states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymmetryMismatch {
    pub x: i32,
    pub mirrored_x: i32,
    pub y: i32,
    pub left: Cell,
    pub right: Cell,
}

/// Check every column in the left half against its mirror.
///
/// Mismatches are diagnostics only: each one is logged and returned, and the
/// grid is left untouched.
pub fn validate(grid: &Grid) -> Vec<SymmetryMismatch> {
    let half = (grid.width() / 2) as i32;
    let mut mismatches = Vec::new();

    for x in 0..half {
        let mx = grid.mirrored_x(x);
        for y in 0..grid.height() as i32 {
            let (Some(left), Some(right)) = (grid.cell(x, y), grid.cell(mx, y)) else {
                continue;
            };
            if left != right {
                warn!("symmetry error at ({x}, {y}) and ({mx}, {y}): {left} vs {right}");
                mismatches.push(SymmetryMismatch {
                    x,
                    mirrored_x: mx,
                    y,
                    left,
                    right,
                });
            }
        }
    }

    mismatches
}
