//! mw-core: Mirrored drunkard's-walk room generator
//!
//! Walkers wander a fixed-size grid carving Floor cells, every write is
//! mirrored across the vertical center line, and a final pass surrounds the
//! carved floor with Wall cells.
//!
//! This crate contains no terminal or rendering code. Front ends read the
//! finished [`Grid`], or drain its write journal while stepping a
//! [`Generator`] one tick at a time.

pub mod config;
pub mod error;
pub mod generation;
pub mod map;
pub mod spawn;
pub mod walker;

mod rng;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, GridError};
pub use generation::{Generated, Generator, Phase, Step, TickReport, generate};
pub use map::{Cell, CellWrite, Grid, SymmetryMismatch};
pub use rng::GenRng;
pub use walker::{Direction, Walker, WalkerPool};
