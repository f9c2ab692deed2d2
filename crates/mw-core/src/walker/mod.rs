//! Walkers: the agents that carve floor
//!
//! Contains the walker data, its movement rule and the bounded pool that
//! owns the live walkers.

mod agent;
mod direction;
mod pool;

pub use agent::Walker;
pub use direction::Direction;
pub use pool::WalkerPool;
