//! Status line widget

use mw_core::Phase;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Snapshot of the run shown under the map
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub phase: Phase,
    pub seed: u64,
    pub ticks: u64,
    pub tile_count: usize,
    pub target: usize,
    pub fill_ratio: f32,
    pub walkers: usize,
    pub mismatches: usize,
    /// Journal writes seen so far
    pub writes: u64,
    pub message: Option<String>,
}

impl StatusInfo {
    pub fn summary(&self) -> String {
        let phase = match self.phase {
            Phase::Carving => "carving",
            Phase::Walling => "walling",
            Phase::Finished => "done",
        };
        format!(
            "{} seed:{} T:{} tiles:{}/{} fill:{:.1}% walkers:{} writes:{} mismatches:{}",
            phase,
            self.seed,
            self.ticks,
            self.tile_count,
            self.target,
            self.fill_ratio * 100.0,
            self.walkers,
            self.writes,
            self.mismatches,
        )
    }
}

/// Widget for rendering the status line
pub struct StatusWidget<'a> {
    info: &'a StatusInfo,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(info: &'a StatusInfo, theme: &'a Theme) -> Self {
        Self { info, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let line1 = self.info.summary();
        buf.set_string(area.x, area.y, &line1, Style::default().fg(self.theme.text));

        if area.height > 1 {
            let (line2, color) = match &self.info.message {
                Some(message) => (message.as_str(), self.theme.bad),
                None => ("hjkl/arrows move  r regenerate  space skip  q quit", self.theme.text_dim),
            };
            buf.set_string(area.x, area.y + 1, line2, Style::default().fg(color));
        }
    }
}
