//! Fixed-size grid of cells
//!
//! Cells are stored row-major (`y * width + x`). `y` grows upward, so text
//! output lists the highest row first.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::error::GridError;

/// A single cell write, recorded for observers such as renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    pub x: i32,
    pub y: i32,
    pub cell: Cell,
}

/// Serialized form of a [`Grid`]
#[derive(Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Two-dimensional cell storage with bounds-checked access
///
/// Dimensions never change after construction. Every successful [`Grid::set`]
/// is appended to the write journal when it is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    #[serde(skip)]
    write_log: Option<Vec<CellWrite>>,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let area = Grid::checked_area(data.width, data.height)?;
        if data.cells.len() != area {
            return Err(GridError::InvalidDimensions {
                width: data.width,
                height: data.height,
            });
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
            write_log: None,
        })
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Largest side length; coordinates are `i32`
    pub const MAX_SIDE: usize = i32::MAX as usize;

    /// Create a grid filled with [`Cell::Empty`]
    ///
    /// Both dimensions must be at least 2 so that every column has a mirror,
    /// and at most [`Grid::MAX_SIDE`].
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let area = Self::checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; area],
            write_log: None,
        })
    }

    /// Parse the output of [`Grid::to_ascii`]. Short lines are padded with empty cells.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.lines().collect();
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width, height)?;

        for (row, line) in lines.iter().enumerate() {
            let y = (height - 1 - row) as i32;
            for (x, c) in line.chars().enumerate() {
                let cell = Cell::from_symbol(c).ok_or(GridError::UnknownSymbol(c))?;
                let idx = grid.index(x as i32, y)?;
                grid.cells[idx] = cell;
            }
        }
        Ok(grid)
    }

    fn checked_area(width: usize, height: usize) -> Result<usize, GridError> {
        let sides = 2..=Self::MAX_SIDE;
        match width.checked_mul(height) {
            Some(area) if sides.contains(&width) && sides.contains(&height) => Ok(area),
            _ => Err(GridError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get the cell at `(x, y)`
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Like [`Grid::get`], but out-of-bounds coordinates yield `None`
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.get(x, y).ok()
    }

    /// Write a single cell. Does not mirror.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        if let Some(log) = self.write_log.as_mut() {
            log.push(CellWrite { x, y, cell });
        }
        Ok(())
    }

    /// Column that mirrors `x` across the vertical center line.
    ///
    /// Total over `i32`; results for coordinates far outside the grid wrap.
    pub fn mirrored_x(&self, x: i32) -> i32 {
        (self.width as i32 - 1).wrapping_sub(x)
    }

    /// Passability test used by movement: in bounds and not a wall
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| c.is_passable())
    }

    /// Start recording every write. Already recorded writes are kept.
    pub fn enable_write_log(&mut self) {
        if self.write_log.is_none() {
            self.write_log = Some(Vec::new());
        }
    }

    /// Take all writes recorded since the last drain
    pub fn drain_writes(&mut self) -> Vec<CellWrite> {
        self.write_log.as_mut().map(core::mem::take).unwrap_or_default()
    }

    /// Number of cells in the given state
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Cells in row-major order, lowest row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(x, y, cell)` over the whole grid
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, c)| {
            ((i % self.width) as i32, (i / self.width) as i32, *c)
        })
    }

    /// Render the grid as text, highest row first
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width).rev() {
            out.extend(row.iter().map(Cell::symbol));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let grid = Grid::new(5, 4).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.area(), 20);
        assert_eq!(grid.count(Cell::Empty), 20);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(1, 10),
            Err(GridError::InvalidDimensions { width: 1, height: 10 })
        );
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(2, 2).is_ok());
        assert!(Grid::new(Grid::MAX_SIDE + 1, 2).is_err());
        assert!(Grid::new(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_json_rejects_huge_dimensions_without_allocating() {
        let json = format!(r#"{{"width":{0},"height":{0},"cells":[]}}"#, Grid::MAX_SIDE);
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(3, 2, Cell::Floor).unwrap();
        assert_eq!(grid.get(3, 2), Ok(Cell::Floor));
        assert_eq!(grid.get(0, 0), Ok(Cell::Empty));

        assert!(matches!(
            grid.get(4, 0),
            Err(GridError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(grid.get(0, -1).is_err());
        assert!(grid.set(-1, 0, Cell::Wall).is_err());
        assert_eq!(grid.cell(0, 3), None);
    }

    #[test]
    fn test_mirrored_x() {
        let grid = Grid::new(4, 4).unwrap();
        assert_eq!(grid.mirrored_x(0), 3);
        assert_eq!(grid.mirrored_x(1), 2);
        assert_eq!(grid.mirrored_x(2), 1);

        let odd = Grid::new(5, 2).unwrap();
        assert_eq!(odd.mirrored_x(2), 2);
        // Total, even outside the grid
        assert_eq!(odd.mirrored_x(-1), 5);
        assert_eq!(grid.mirrored_x(i32::MIN), 3i32.wrapping_sub(i32::MIN));
        assert_eq!(grid.mirrored_x(i32::MAX), 3 - i32::MAX);
    }

    #[test]
    fn test_write_log() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::Floor).unwrap();
        assert!(grid.drain_writes().is_empty());

        grid.enable_write_log();
        grid.set(1, 1, Cell::Floor).unwrap();
        grid.set(2, 1, Cell::Wall).unwrap();
        let _ = grid.set(9, 9, Cell::Wall);

        let writes = grid.drain_writes();
        assert_eq!(
            writes,
            vec![
                CellWrite { x: 1, y: 1, cell: Cell::Floor },
                CellWrite { x: 2, y: 1, cell: Cell::Wall },
            ]
        );
        assert!(grid.drain_writes().is_empty());
    }

    #[test]
    fn test_ascii_round_trip() {
        let text = "#..#\n    \n";
        let grid = Grid::from_ascii(text).unwrap();
        assert_eq!(grid.get(0, 1), Ok(Cell::Wall));
        assert_eq!(grid.get(1, 1), Ok(Cell::Floor));
        assert_eq!(grid.get(0, 0), Ok(Cell::Empty));
        assert_eq!(grid.to_ascii(), text);
    }

    #[test]
    fn test_from_ascii_rejects_unknown() {
        assert_eq!(
            Grid::from_ascii("..\n.x\n"),
            Err(GridError::UnknownSymbol('x'))
        );
    }

    #[test]
    fn test_equality_ignores_write_log() {
        let mut a = Grid::new(3, 3).unwrap();
        let mut b = Grid::new(3, 3).unwrap();
        a.enable_write_log();
        a.set(1, 1, Cell::Floor).unwrap();
        b.set(1, 1, Cell::Floor).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_passability() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Cell::Wall).unwrap();
        grid.set(0, 1, Cell::Floor).unwrap();
        assert!(!grid.is_passable(1, 1));
        assert!(grid.is_passable(0, 1));
        assert!(grid.is_passable(2, 2));
        assert!(!grid.is_passable(3, 0));
    }

    #[test]
    fn test_json_snapshot() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(1, 0, Cell::Floor).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(
            json,
            r#"{"width":2,"height":2,"cells":["Empty","Floor","Empty","Empty"]}"#
        );

        let restored: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);

        let bad = r#"{"width":2,"height":2,"cells":["Empty"]}"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());
    }
}
