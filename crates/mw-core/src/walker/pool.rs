//! Bounded walker population
//!
//! The pool never drops below one walker and never exceeds its maximum.
//! Requests that would break either bound are refused silently.

use serde::{Deserialize, Serialize};

use super::Walker;
use crate::rng::GenRng;

/// Ordered collection of live walkers, sized within `[1, max_walkers]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerPool {
    walkers: Vec<Walker>,
    max_walkers: usize,
}

impl WalkerPool {
    /// Create a pool holding `first`. A `max_walkers` of 0 is treated as 1.
    pub fn new(first: Walker, max_walkers: usize) -> Self {
        Self {
            walkers: vec![first],
            max_walkers: max_walkers.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    /// Always false: the pool keeps at least one walker
    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    pub fn max_walkers(&self) -> usize {
        self.max_walkers
    }

    pub fn is_full(&self) -> bool {
        self.walkers.len() >= self.max_walkers
    }

    pub fn get(&self, index: usize) -> Option<&Walker> {
        self.walkers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Walker> {
        self.walkers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Walker> {
        self.walkers.iter_mut()
    }

    pub fn as_slice(&self) -> &[Walker] {
        &self.walkers
    }

    /// Remove the walker at `index`. Refused if it is the last one.
    pub fn try_remove(&mut self, index: usize) -> Option<Walker> {
        if self.walkers.len() <= 1 || index >= self.walkers.len() {
            return None;
        }
        Some(self.walkers.remove(index))
    }

    /// Append a walker. Refused when the pool is full.
    pub fn try_spawn(&mut self, walker: Walker) -> bool {
        if self.is_full() {
            return false;
        }
        self.walkers.push(walker);
        true
    }

    /// Scan in order and remove the first walker whose draw falls below its
    /// change probability. At most one walker is removed per call.
    ///
    /// Every scanned walker consumes a draw, even when removal would be refused.
    pub fn maybe_remove(&mut self, rng: &mut GenRng) -> Option<Walker> {
        for i in 0..self.walkers.len() {
            if rng.chance(self.walkers[i].change_probability) && self.walkers.len() > 1 {
                return self.try_remove(i);
            }
        }
        None
    }

    /// Give each walker a chance to pick a fresh random heading.
    /// Returns how many were redirected.
    pub fn maybe_redirect(&mut self, rng: &mut GenRng) -> usize {
        let mut redirected = 0;
        for walker in &mut self.walkers {
            if rng.chance(walker.change_probability) {
                walker.direction = rng.direction();
                redirected += 1;
            }
        }
        redirected
    }

    /// Give each walker present before the call a chance to spawn a child at
    /// its position. Several spawns per call are possible, up to the maximum.
    /// Returns how many were spawned.
    pub fn maybe_spawn(&mut self, rng: &mut GenRng) -> usize {
        let snapshot = self.walkers.len();
        let mut spawned = 0;
        for i in 0..snapshot {
            let parent = self.walkers[i];
            if rng.chance(parent.change_probability) && !self.is_full() {
                let child = parent.spawn_child(rng.direction());
                self.walkers.push(child);
                spawned += 1;
            }
        }
        spawned
    }
}
