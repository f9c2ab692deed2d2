//! Cell states

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// State of a single grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Floor = 1,
    Wall = 2,
}

impl Cell {
    /// Anything but a wall can be walked on
    pub const fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Get the display character for this cell
    pub const fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Floor => '.',
            Cell::Wall => '#',
        }
    }

    /// Inverse of [`Cell::symbol`]
    pub const fn from_symbol(c: char) -> Option<Cell> {
        match c {
            ' ' => Some(Cell::Empty),
            '.' => Some(Cell::Floor),
            '#' => Some(Cell::Wall),
            _ => None,
        }
    }
}
