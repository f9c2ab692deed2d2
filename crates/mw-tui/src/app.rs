//! Viewer state: drives a generator, then lets an avatar explore the result

use std::time::{Duration, Instant};

use crossterm::event::Event;
use log::{error, warn};
use mw_core::{
    CellWrite, GenRng, GenerateError, Generator, GeneratorConfig, Phase, Step, Walker, spawn,
};
use ratatui::prelude::*;

use crate::display::{GlyphSet, GraphicsMode};
use crate::input::{Command, key_to_command};
use crate::theme::Theme;
use crate::widgets::{MapWidget, StatusInfo, StatusWidget};

/// Ticks run per frame when there is no animation delay
const UNPACED_STEPS_PER_FRAME: usize = 256;

/// What the viewer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Stepping the generator
    Generating,
    /// Map finished, avatar can move
    Exploring,
    /// The run stopped with an error; only regenerate or quit
    Failed,
}

pub struct App {
    config: GeneratorConfig,
    generator: Generator,
    /// Seeds for regeneration and avatar placement
    rng: GenRng,
    mode: UiMode,
    avatar: Option<(i32, i32)>,
    /// Writes made by the last animated step, highlighted on the map
    recent: Vec<CellWrite>,
    /// Writes drained from the grid journal since the run started
    writes_seen: u64,
    message: Option<String>,
    delay: Duration,
    last_step: Option<Instant>,
    glyphs: Box<dyn GlyphSet>,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: GeneratorConfig,
        graphics: GraphicsMode,
        delay: Duration,
    ) -> Result<Self, GenerateError> {
        let rng = match config.seed {
            Some(seed) => GenRng::new(seed.wrapping_add(1)),
            None => GenRng::from_entropy(),
        };
        let generator = Self::start(config.clone())?;

        Ok(Self {
            config,
            generator,
            rng,
            mode: UiMode::Generating,
            avatar: None,
            recent: Vec::new(),
            writes_seen: 0,
            message: None,
            delay,
            last_step: None,
            glyphs: graphics.glyphs(),
            theme: Theme::default(),
            should_quit: false,
        })
    }

    /// New generator with its write journal turned on
    fn start(config: GeneratorConfig) -> Result<Generator, GenerateError> {
        let mut generator = Generator::new(config)?;
        generator.grid_mut().enable_write_log();
        Ok(generator)
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn avatar(&self) -> Option<(i32, i32)> {
        self.avatar
    }

    /// Cells written by the last animated step
    pub fn recent_writes(&self) -> &[CellWrite] {
        &self.recent
    }

    pub fn writes_seen(&self) -> u64 {
        self.writes_seen
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Map a terminal event to a command
    pub fn handle_event(&self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) => key_to_command(key),
            _ => None,
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                if let (UiMode::Exploring, Some(pos)) = (self.mode, self.avatar) {
                    self.recent.clear();
                    self.avatar = Some(spawn::try_step(self.generator.grid(), pos, dir));
                }
            }
            Command::Regenerate => self.regenerate(),
            Command::Skip => {
                while self.mode == UiMode::Generating {
                    self.step_once();
                }
                self.recent.clear();
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// Advance the animation if the delay since the last progressed tick has passed
    pub fn update(&mut self, now: Instant) {
        if self.mode != UiMode::Generating {
            return;
        }
        if self.delay.is_zero() {
            for _ in 0..UNPACED_STEPS_PER_FRAME {
                if self.mode != UiMode::Generating {
                    break;
                }
                self.advance();
            }
            return;
        }
        let due = match self.last_step {
            Some(last) => now.duration_since(last) >= self.delay,
            None => true,
        };
        if due {
            self.advance();
            self.last_step = Some(now);
        }
    }

    /// Step until a tick carves something or the phase changes.
    ///
    /// Ticks that carve nothing are not worth a frame.
    fn advance(&mut self) {
        self.recent.clear();
        while self.mode == UiMode::Generating {
            match self.step_once() {
                Some(Step::Tick(report)) if !report.progressed => continue,
                _ => break,
            }
        }
    }

    fn step_once(&mut self) -> Option<Step> {
        let result = self.generator.step();
        let writes = self.generator.grid_mut().drain_writes();
        self.writes_seen += writes.len() as u64;
        self.recent.extend(writes);

        match result {
            Ok(step) => {
                match &step {
                    Step::FloorsComplete(mismatches) if !mismatches.is_empty() => {
                        self.message = Some(format!(
                            "{} symmetry mismatches after carving",
                            mismatches.len()
                        ));
                    }
                    Step::WallsBuilt(_) | Step::Finished => self.finish(),
                    _ => {}
                }
                Some(step)
            }
            Err(err) => {
                error!("generation failed: {err}");
                self.message = Some(err.to_string());
                self.mode = UiMode::Failed;
                None
            }
        }
    }

    fn finish(&mut self) {
        self.mode = UiMode::Exploring;
        self.avatar = spawn::random_floor(self.generator.grid(), &mut self.rng);
        if self.avatar.is_none() {
            warn!("finished map has no floor to stand on");
        }
    }

    /// Start over with a fresh seed and the same settings
    pub fn regenerate(&mut self) {
        let mut config = self.config.clone();
        config.seed = Some(u64::from(self.rng.rn2(u32::MAX)));
        match Self::start(config) {
            Ok(generator) => {
                self.generator = generator;
                self.mode = UiMode::Generating;
                self.avatar = None;
                self.recent.clear();
                self.writes_seen = 0;
                self.message = None;
                self.last_step = None;
            }
            Err(err) => {
                error!("regenerate failed: {err}");
                self.message = Some(err.to_string());
                self.mode = UiMode::Failed;
            }
        }
    }

    pub fn status(&self) -> StatusInfo {
        let generator = &self.generator;
        StatusInfo {
            phase: generator.phase(),
            seed: generator.seed(),
            ticks: generator.ticks(),
            tile_count: generator.tile_count(),
            target: generator.target_tiles(),
            fill_ratio: generator.fill_ratio(),
            walkers: generator.walkers().len(),
            mismatches: generator.mismatches().len(),
            writes: self.writes_seen,
            message: self.message.clone(),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).split(frame.area());

        let walkers: &[Walker] = match self.generator.phase() {
            Phase::Carving => self.generator.walkers().as_slice(),
            _ => &[],
        };
        let map = MapWidget::new(self.generator.grid(), self.glyphs.as_ref(), &self.theme)
            .walkers(walkers)
            .highlights(&self.recent)
            .avatar(self.avatar)
            .title(format!(
                "mirrorwalk {}x{}",
                self.config.width, self.config.height
            ));
        frame.render_widget(map, chunks[0]);

        let status = self.status();
        frame.render_widget(StatusWidget::new(&status, &self.theme), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_core::{Cell, Direction};

    fn app(seed: u64) -> App {
        let config = GeneratorConfig {
            width: 16,
            height: 12,
            fill_percentage: 0.2,
            seed: Some(seed),
            ..GeneratorConfig::default()
        };
        App::new(config, GraphicsMode::Classic, Duration::ZERO).unwrap()
    }

    #[test]
    fn test_skip_finishes_and_spawns_avatar() {
        let mut app = app(3);
        assert_eq!(app.mode(), UiMode::Generating);
        app.execute(Command::Skip);

        assert_eq!(app.mode(), UiMode::Exploring);
        assert_eq!(app.generator().phase(), Phase::Finished);
        let (x, y) = app.avatar().unwrap();
        assert_eq!(app.generator().grid().get(x, y), Ok(Cell::Floor));
    }

    #[test]
    fn test_unpaced_update_finishes() {
        let mut app = app(4);
        let now = Instant::now();
        for _ in 0..10_000 {
            if app.mode() != UiMode::Generating {
                break;
            }
            app.update(now);
        }
        assert_eq!(app.mode(), UiMode::Exploring);
    }

    #[test]
    fn test_paced_update_waits_for_delay() {
        let config = GeneratorConfig {
            width: 16,
            height: 12,
            fill_percentage: 0.2,
            seed: Some(8),
            ..GeneratorConfig::default()
        };
        let mut app = App::new(config, GraphicsMode::Classic, Duration::from_millis(50)).unwrap();
        let start = Instant::now();

        app.update(start);
        let ticks = app.generator().ticks();
        assert!(ticks >= 1);
        app.update(start + Duration::from_millis(10));
        assert_eq!(app.generator().ticks(), ticks);
        app.update(start + Duration::from_millis(60));
        assert!(app.generator().ticks() > ticks || app.mode() != UiMode::Generating);
    }

    #[test]
    fn test_moves_ignored_while_generating() {
        let mut app = app(5);
        app.execute(Command::Move(Direction::Left));
        assert_eq!(app.avatar(), None);
    }

    #[test]
    fn test_avatar_stays_off_walls() {
        let mut app = app(6);
        app.execute(Command::Skip);
        for dir in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
            for _ in 0..20 {
                app.execute(Command::Move(dir));
                let (x, y) = app.avatar().unwrap();
                assert!(app.generator().grid().is_passable(x, y));
            }
        }
    }

    #[test]
    fn test_regenerate_changes_seed() {
        let mut app = app(7);
        app.execute(Command::Skip);
        let first = app.generator().seed();

        app.execute(Command::Regenerate);
        assert_eq!(app.mode(), UiMode::Generating);
        assert_eq!(app.avatar(), None);
        assert_ne!(app.generator().seed(), first);
    }

    #[test]
    fn test_quit() {
        let mut app = app(9);
        assert!(!app.should_quit());
        app.execute(Command::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_stall_shows_error() {
        let config = GeneratorConfig {
            width: 10,
            height: 10,
            max_walkers: 1,
            fill_percentage: 0.3,
            change_probability: 0.0,
            seed: Some(1),
            max_idle_ticks: Some(20),
        };
        let mut app = App::new(config, GraphicsMode::Classic, Duration::ZERO).unwrap();
        app.execute(Command::Skip);
        assert_eq!(app.mode(), UiMode::Failed);
        assert!(app.message().unwrap().contains("stalled"));
    }

    #[test]
    fn test_recent_writes_follow_the_journal() {
        let config = GeneratorConfig {
            width: 16,
            height: 12,
            fill_percentage: 0.2,
            seed: Some(12),
            ..GeneratorConfig::default()
        };
        let mut app = App::new(config, GraphicsMode::Classic, Duration::from_millis(50)).unwrap();
        app.update(Instant::now());

        let recent = app.recent_writes().to_vec();
        assert!(!recent.is_empty());
        for write in &recent {
            assert_eq!(write.cell, Cell::Floor);
            assert_eq!(app.generator().grid().get(write.x, write.y), Ok(Cell::Floor));
        }
        assert!(app.writes_seen() >= recent.len() as u64);

        app.execute(Command::Skip);
        assert!(app.recent_writes().is_empty());
        let walls = app.generator().grid().count(Cell::Wall) as u64;
        assert!(app.writes_seen() >= walls);

        app.execute(Command::Regenerate);
        assert_eq!(app.writes_seen(), 0);
    }

    #[test]
    fn test_render_on_tiny_terminals() {
        use ratatui::backend::TestBackend;

        let mut app = app(11);
        for (width, height) in [(20, 1), (20, 2), (1, 1), (3, 4)] {
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
        app.execute(Command::Skip);
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_render_smoke() {
        use ratatui::backend::TestBackend;

        let mut app = app(10);
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.execute(Command::Skip);
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
