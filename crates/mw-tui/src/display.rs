//! Glyph sets for drawing the map
//!
//! Classic mode uses the same symbols as [`mw_core::Grid::to_ascii`]; fancy
//! mode uses Unicode blocks and dots.

use mw_core::Cell;
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Plain ASCII, matching the headless output.
    #[default]
    Classic,
    /// Unicode block characters.
    Fancy,
}

impl GraphicsMode {
    pub fn glyphs(self) -> Box<dyn GlyphSet> {
        match self {
            GraphicsMode::Classic => Box::new(ClassicGlyphs),
            GraphicsMode::Fancy => Box::new(FancyGlyphs),
        }
    }
}

/// Set of glyphs used for rendering the map.
pub trait GlyphSet: Send + Sync {
    /// Character for a grid cell.
    fn cell_char(&self, cell: Cell) -> char;

    /// Character for a walker still carving.
    fn walker_char(&self) -> char;

    /// Character for the avatar exploring a finished map.
    fn avatar_char(&self) -> char {
        '@'
    }
}

pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn cell_char(&self, cell: Cell) -> char {
        cell.symbol()
    }

    fn walker_char(&self) -> char {
        '*'
    }
}

pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn cell_char(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => ' ',
            Cell::Floor => '·',
            Cell::Wall => '█',
        }
    }

    fn walker_char(&self) -> char {
        '●'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classic_matches_ascii_symbols() {
        let glyphs = GraphicsMode::Classic.glyphs();
        for cell in Cell::iter() {
            assert_eq!(glyphs.cell_char(cell), cell.symbol());
        }
    }

    #[test]
    fn test_glyph_sets_keep_empty_blank() {
        for mode in [GraphicsMode::Classic, GraphicsMode::Fancy] {
            let glyphs = mode.glyphs();
            assert_eq!(glyphs.cell_char(Cell::Empty), ' ');
            assert_eq!(glyphs.avatar_char(), '@');
            assert_ne!(glyphs.walker_char(), glyphs.cell_char(Cell::Floor));
        }
    }

    #[test]
    fn test_graphics_mode_parse() {
        assert_eq!(GraphicsMode::from_str("fancy"), Ok(GraphicsMode::Fancy));
        assert_eq!(GraphicsMode::Classic.to_string(), "classic");
        assert!(GraphicsMode::from_str("sixel").is_err());
        assert_eq!(GraphicsMode::VARIANTS, &["classic", "fancy"]);
    }
}
