//! Map generation
//!
//! Floor carving by a pool of walkers, followed by a single wall pass.

mod carver;
mod generator;
mod walls;

pub use carver::{FloorCarver, TickReport};
pub use generator::{Generated, Generator, Phase, Step, generate};
pub use walls::build_walls;
