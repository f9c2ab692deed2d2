//! Floor carving
//!
//! One tick runs carve, remove, redirect, spawn and advance over the whole
//! walker pool, in that order. Ticks repeat until the counted tile total
//! reaches the configured fill target.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::map::{Cell, Grid, symmetry};
use crate::rng::GenRng;
use crate::walker::{Walker, WalkerPool};

/// Summary of one carving tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    /// True if the carve step turned at least one cell into floor
    pub progressed: bool,
    /// Counted tiles after this tick
    pub tile_count: usize,
    /// Pool size after this tick
    pub walkers: usize,
}

/// Walker pool plus the counters of the carving loop
#[derive(Debug, Clone)]
pub struct FloorCarver {
    pool: WalkerPool,
    tile_count: usize,
    target: usize,
    ticks: u64,
    idle_ticks: u64,
}

impl FloorCarver {
    /// Carve the center cell and place the first walker on it
    pub fn start(
        grid: &mut Grid,
        rng: &mut GenRng,
        max_walkers: usize,
        change_probability: f32,
        target: usize,
    ) -> Result<Self, GridError> {
        let cx = (grid.width() / 2) as i32;
        let cy = (grid.height() / 2) as i32;

        let first = Walker::new(cx, cy, rng.direction(), change_probability);
        symmetry::set_symmetric(grid, cx, cy, Cell::Floor)?;

        Ok(Self {
            pool: WalkerPool::new(first, max_walkers),
            tile_count: 1,
            target,
            ticks: 0,
            idle_ticks: 0,
        })
    }

    pub fn pool(&self) -> &WalkerPool {
        &self.pool
    }

    /// Tiles counted by the carve step, including the starting cell.
    ///
    /// Mirror writes and advance-step writes are not counted, so the number of
    /// floor cells on the grid is at least this.
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Consecutive ticks that carved nothing
    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    /// True once the fill target is met
    pub fn is_complete(&self) -> bool {
        self.tile_count >= self.target
    }

    /// Run one full tick
    pub fn tick(&mut self, grid: &mut Grid, rng: &mut GenRng) -> Result<TickReport, GridError> {
        let progressed = self.carve(grid)?;

        self.pool.maybe_remove(rng);
        self.pool.maybe_redirect(rng);
        self.pool.maybe_spawn(rng);
        self.advance(grid)?;

        self.ticks += 1;
        if progressed {
            self.idle_ticks = 0;
        } else {
            self.idle_ticks += 1;
        }

        Ok(TickReport {
            tick: self.ticks,
            progressed,
            tile_count: self.tile_count,
            walkers: self.pool.len(),
        })
    }

    /// Mark every walker's cell as floor, mirrored and counted, unless it already is
    fn carve(&mut self, grid: &mut Grid) -> Result<bool, GridError> {
        let mut progressed = false;
        for walker in self.pool.iter() {
            let (x, y) = walker.position();
            if grid.get(x, y)? != Cell::Floor {
                symmetry::set_symmetric(grid, x, y, Cell::Floor)?;
                self.tile_count += 1;
                progressed = true;
            }
        }
        Ok(progressed)
    }

    /// Step every walker, then seed floor at the mirror of its new cell.
    ///
    /// Only the mirror is written here and it is not counted. The walker's own
    /// cell is carved by the next tick's carve step.
    fn advance(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        let (width, height) = (grid.width(), grid.height());
        for walker in self.pool.iter_mut() {
            walker.advance(width, height);

            let mx = grid.mirrored_x(walker.x);
            if grid.get(mx, walker.y)? == Cell::Empty {
                grid.set(mx, walker.y, Cell::Floor)?;
            }
        }
        Ok(())
    }
}
