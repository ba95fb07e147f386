//! Direct-mapped placement.
//!
//! With one way per set there is nothing to choose: the resident line is always evicted.

use super::ReplacementPolicy;

/// Stateless policy for single-way sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectMappedPolicy;

impl ReplacementPolicy for DirectMappedPolicy {
    fn update(&mut self, _set: usize, _way: usize, _now: u32) {}

    fn get_victim(&mut self, _set: usize) -> usize {
        0
    }

    fn reset(&mut self) {}
}
