//! A single drunkard's-walk agent

use serde::{Deserialize, Serialize};

use super::Direction;

/// A mobile agent that carves floor as it moves
///
/// Positions are whole grid cells. Walkers have no identity beyond their
/// fields; two walkers with equal fields are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Walker {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    /// Per-tick probability of being removed, redirected or spawning a child.
    /// Fixed for the walker's lifetime.
    pub change_probability: f32,
}

/// Clamp a coordinate to `[1, dim - 2]`, the range that leaves a free border
fn clamp_interior(v: i32, dim: usize) -> i32 {
    let hi = (dim as i32 - 2).max(1);
    v.clamp(1, hi)
}

impl Walker {
    pub fn new(x: i32, y: i32, direction: Direction, change_probability: f32) -> Self {
        Self {
            x,
            y,
            direction,
            change_probability,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Take one step in the current direction, staying off the outer border
    pub fn advance(&mut self, width: usize, height: usize) {
        let (dx, dy) = self.direction.delta();
        self.x = clamp_interior(self.x + dx, width);
        self.y = clamp_interior(self.y + dy, height);
    }

    /// A child at the same cell, heading `direction`, with the same change probability
    pub fn spawn_child(&self, direction: Direction) -> Walker {
        Walker {
            direction,
            ..*self
        }
    }
}
