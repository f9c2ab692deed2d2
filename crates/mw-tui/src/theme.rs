//! Color themes for the viewer

use mw_core::Cell;
use ratatui::style::Color;

/// Colors used by the map and status widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub accent: Color,
    pub bad: Color,

    pub map_empty: Color,
    pub map_floor: Color,
    pub map_wall: Color,
    pub map_walker: Color,
    pub map_avatar: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::Cyan,
            bad: Color::Red,
            map_empty: Color::Black,
            map_floor: Color::Gray,
            map_wall: Color::Yellow,
            map_walker: Color::LightGreen,
            map_avatar: Color::White,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Blue,
            bad: Color::Red,
            map_empty: Color::White,
            map_floor: Color::DarkGray,
            map_wall: Color::Magenta,
            map_walker: Color::Green,
            map_avatar: Color::Black,
        }
    }

    pub fn cell_color(&self, cell: Cell) -> Color {
        match cell {
            Cell::Empty => self.map_empty,
            Cell::Floor => self.map_floor,
            Cell::Wall => self.map_wall,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
