//! Map storage
//!
//! Contains the cell states, the grid that holds them and the mirroring rules.

mod cell;
mod grid;
pub mod symmetry;

pub use cell::Cell;
pub use grid::{CellWrite, Grid};
pub use symmetry::{SymmetryMismatch, place_symmetric, set_symmetric, validate};
