//! Map widget - renders the grid, walkers and the avatar

use mw_core::{CellWrite, Grid, Walker};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use crate::display::GlyphSet;
use crate::theme::Theme;

/// Widget for rendering a generator grid.
///
/// Row `height - 1` is drawn at the top so that `Up` points up on screen.
pub struct MapWidget<'a> {
    grid: &'a Grid,
    walkers: &'a [Walker],
    highlights: &'a [CellWrite],
    avatar: Option<(i32, i32)>,
    glyphs: &'a dyn GlyphSet,
    theme: &'a Theme,
    title: String,
}

impl<'a> MapWidget<'a> {
    pub fn new(grid: &'a Grid, glyphs: &'a dyn GlyphSet, theme: &'a Theme) -> Self {
        Self {
            grid,
            walkers: &[],
            highlights: &[],
            avatar: None,
            glyphs,
            theme,
            title: format!("{}x{}", grid.width(), grid.height()),
        }
    }

    pub fn walkers(mut self, walkers: &'a [Walker]) -> Self {
        self.walkers = walkers;
        self
    }

    /// Cells written recently, drawn in the accent color
    pub fn highlights(mut self, writes: &'a [CellWrite]) -> Self {
        self.highlights = writes;
        self
    }

    pub fn avatar(mut self, avatar: Option<(i32, i32)>) -> Self {
        self.avatar = avatar;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Screen offset of grid cell `(x, y)` inside an area of `rows` rows, if visible
    fn screen_pos(&self, x: i32, y: i32, cols: u16, rows: u16) -> Option<(u16, u16)> {
        let top = self.grid.height() as i32 - 1;
        let (sx, sy) = (x, top - y);
        if sx < 0 || sy < 0 || sx >= cols as i32 || sy >= rows as i32 {
            return None;
        }
        Some((sx as u16, sy as u16))
    }

    fn put(buf: &mut Buffer, inner: Rect, (sx, sy): (u16, u16), ch: char, style: Style) {
        if let Some(cell) = buf.cell_mut(Position::new(inner.x + sx, inner.y + sy)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        for (x, y, cell) in self.grid.iter() {
            if let Some(pos) = self.screen_pos(x, y, inner.width, inner.height) {
                let style = Style::default().fg(self.theme.cell_color(cell));
                Self::put(buf, inner, pos, self.glyphs.cell_char(cell), style);
            }
        }

        let highlight_style = Style::default().fg(self.theme.accent);
        for write in self.highlights {
            if let Some(pos) = self.screen_pos(write.x, write.y, inner.width, inner.height) {
                Self::put(buf, inner, pos, self.glyphs.cell_char(write.cell), highlight_style);
            }
        }

        let walker_style = Style::default()
            .fg(self.theme.map_walker)
            .add_modifier(Modifier::BOLD);
        for walker in self.walkers {
            if let Some(pos) = self.screen_pos(walker.x, walker.y, inner.width, inner.height) {
                Self::put(buf, inner, pos, self.glyphs.walker_char(), walker_style);
            }
        }

        if let Some((x, y)) = self.avatar {
            if let Some(pos) = self.screen_pos(x, y, inner.width, inner.height) {
                let style = Style::default()
                    .fg(self.theme.map_avatar)
                    .add_modifier(Modifier::BOLD);
                Self::put(buf, inner, pos, self.glyphs.avatar_char(), style);
            }
        }
    }
}
