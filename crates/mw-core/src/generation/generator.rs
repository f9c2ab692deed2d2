//! Step-by-step generation driver
//!
//! A [`Generator`] moves through three phases: carving floor one tick at a
//! time, a single wall pass, then finished. Callers either drive it with
//! [`Generator::step`] (to animate or to interleave with other work) or run it
//! to completion with [`Generator::run`].

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::carver::{FloorCarver, TickReport};
use super::walls::build_walls;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::map::{Grid, SymmetryMismatch, symmetry};
use crate::rng::GenRng;
use crate::walker::WalkerPool;

/// Where a generator is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Carving,
    Walling,
    Finished,
}

/// Outcome of a single [`Generator::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// One carving tick ran
    Tick(TickReport),
    /// The fill target was met. Carries the symmetry check of the carved floor.
    FloorsComplete(Vec<SymmetryMismatch>),
    /// The wall pass ran and wrote this many walls
    WallsBuilt(usize),
    /// Nothing left to do
    Finished,
}

/// A finished map and the statistics of the run that made it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generated {
    pub grid: Grid,
    pub tile_count: usize,
    pub ticks: u64,
    pub mismatches: Vec<SymmetryMismatch>,
    pub seed: u64,
}

/// Mirrored drunkard's-walk generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    grid: Grid,
    rng: GenRng,
    carver: FloorCarver,
    phase: Phase,
    mismatches: Vec<SymmetryMismatch>,
}

impl Generator {
    /// Validate `config`, carve the center cell and place the first walker
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GenRng::new(seed),
            None => GenRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Like [`Generator::new`], but with an explicit random source.
    /// `config.seed` is ignored.
    pub fn with_rng(config: GeneratorConfig, mut rng: GenRng) -> Result<Self, GenerateError> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height)?;
        let carver = FloorCarver::start(
            &mut grid,
            &mut rng,
            config.max_walkers,
            config.change_probability,
            config.target_tiles(),
        )?;

        Ok(Self {
            config,
            grid,
            rng,
            carver,
            phase: Phase::Carving,
            mismatches: Vec::new(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for observers, e.g. to enable or drain the write journal
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn walkers(&self) -> &WalkerPool {
        self.carver.pool()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn tile_count(&self) -> usize {
        self.carver.tile_count()
    }

    pub fn ticks(&self) -> u64 {
        self.carver.ticks()
    }

    /// Tile count at which carving stops
    pub fn target_tiles(&self) -> usize {
        self.carver.target()
    }

    /// Counted tiles as a fraction of the grid area
    pub fn fill_ratio(&self) -> f32 {
        self.carver.tile_count() as f32 / self.grid.area() as f32
    }

    /// Symmetry mismatches found when carving ended
    pub fn mismatches(&self) -> &[SymmetryMismatch] {
        &self.mismatches
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Advance the run by one unit of work
    pub fn step(&mut self) -> Result<Step, GenerateError> {
        match self.phase {
            Phase::Carving if !self.carver.is_complete() => {
                if self.carver.idle_ticks() >= self.config.idle_tick_limit() {
                    return Err(GenerateError::Stalled {
                        ticks: self.carver.ticks(),
                        tile_count: self.carver.tile_count(),
                        target: self.carver.target(),
                    });
                }
                let report = self.carver.tick(&mut self.grid, &mut self.rng)?;
                Ok(Step::Tick(report))
            }
            Phase::Carving => {
                debug!(
                    "carving done after {} ticks: {} tiles, {} walkers",
                    self.carver.ticks(),
                    self.carver.tile_count(),
                    self.carver.pool().len()
                );
                self.mismatches = symmetry::validate(&self.grid);
                self.phase = Phase::Walling;
                Ok(Step::FloorsComplete(self.mismatches.clone()))
            }
            Phase::Walling => {
                let walled = build_walls(&mut self.grid)?;
                self.phase = Phase::Finished;
                info!(
                    "generated {}x{} map (seed {}): {} ticks, {} tiles, {} walls",
                    self.grid.width(),
                    self.grid.height(),
                    self.rng.seed(),
                    self.carver.ticks(),
                    self.carver.tile_count(),
                    walled
                );
                Ok(Step::WallsBuilt(walled))
            }
            Phase::Finished => Ok(Step::Finished),
        }
    }

    /// Run to completion
    pub fn run(self) -> Result<Generated, GenerateError> {
        self.run_until(|| false)
    }

    /// Run to completion, checking `cancel` before every step.
    ///
    /// Returns [`GenerateError::Cancelled`] as soon as `cancel` returns true.
    /// The partial grid is discarded.
    pub fn run_until(mut self, mut cancel: impl FnMut() -> bool) -> Result<Generated, GenerateError> {
        while !self.is_finished() {
            if cancel() {
                return Err(GenerateError::Cancelled {
                    ticks: self.carver.ticks(),
                });
            }
            self.step()?;
        }
        Ok(self.into_generated())
    }

    fn into_generated(self) -> Generated {
        Generated {
            tile_count: self.carver.tile_count(),
            ticks: self.carver.ticks(),
            seed: self.rng.seed(),
            grid: self.grid,
            mismatches: self.mismatches,
        }
    }
}

/// Generate a map in one call
pub fn generate(config: GeneratorConfig) -> Result<Generated, GenerateError> {
    Generator::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::map::Cell;

    fn config(width: usize, height: usize, fill: f32, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            width,
            height,
            fill_percentage: fill,
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_phases_in_order() {
        let mut generator = Generator::new(config(16, 12, 0.2, 5)).unwrap();
        assert_eq!(generator.phase(), Phase::Carving);

        let mut saw_tick = false;
        loop {
            match generator.step().unwrap() {
                Step::Tick(_) => {
                    assert_eq!(generator.phase(), Phase::Carving);
                    saw_tick = true;
                }
                Step::FloorsComplete(_) => {
                    assert!(saw_tick);
                    assert_eq!(generator.phase(), Phase::Walling);
                }
                Step::WallsBuilt(walls) => {
                    assert!(walls > 0);
                    assert_eq!(generator.phase(), Phase::Finished);
                }
                Step::Finished => break,
            }
        }
        assert_eq!(generator.step().unwrap(), Step::Finished);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Generator::new(config(2, 2, 0.1, 1)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Config(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_seed_is_reported() {
        let generated = generate(config(12, 12, 0.15, 77)).unwrap();
        assert_eq!(generated.seed, 77);
        assert!(generated.tile_count >= config(12, 12, 0.15, 77).target_tiles());
        assert!(generated.grid.count(Cell::Wall) > 0);
    }

    #[test]
    fn test_stall_is_reported() {
        let mut cfg = config(10, 10, 0.3, 1);
        cfg.change_probability = 0.0;
        cfg.max_walkers = 1;
        cfg.max_idle_ticks = Some(25);

        let err = generate(cfg).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Stalled { target: 30, tile_count, .. } if tile_count <= 5
        ));
    }

    #[test]
    fn test_cancel_between_ticks() {
        let generator = Generator::new(config(20, 20, 0.3, 9)).unwrap();
        let mut calls = 0;
        let err = generator
            .run_until(|| {
                calls += 1;
                calls > 10
            })
            .unwrap_err();
        assert!(matches!(err, GenerateError::Cancelled { ticks: 10 }));
    }

    #[test]
    fn test_write_journal_sees_every_change() {
        let mut generator = Generator::new(config(14, 10, 0.2, 21)).unwrap();
        let mut mirror = generator.grid().clone();
        generator.grid_mut().enable_write_log();

        while !generator.is_finished() {
            generator.step().unwrap();
            for write in generator.grid_mut().drain_writes() {
                mirror.set(write.x, write.y, write.cell).unwrap();
            }
        }
        assert_eq!(&mirror, generator.grid());
    }
}
