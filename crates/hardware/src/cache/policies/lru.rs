//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! Each way carries the simulated time of its last fill or hit. The victim is the way
//! with the smallest stamp; among equal stamps the lowest way index wins.
//!
//! Stamps are taken from the hierarchy's time counter, so they are only comparable
//! between calls to `reset_time`.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Last-used stamp per line, laid out `set * ways + way`.
    last_used: Vec<u32>,
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            last_used: vec![0; sets * ways],
            ways,
        }
    }

    /// Returns the stamp recorded for `way` of `set`.
    pub fn last_used(&self, set: usize, way: usize) -> u32 {
        self.last_used[set * self.ways + way]
    }
}

impl ReplacementPolicy for LruPolicy {
    fn update(&mut self, set: usize, way: usize, now: u32) {
        self.last_used[set * self.ways + way] = now;
    }

    /// Returns the way with the oldest stamp, preferring lower ways on ties.
    fn get_victim(&mut self, set: usize) -> usize {
        let stamps = &self.last_used[set * self.ways..(set + 1) * self.ways];
        let mut victim = 0;
        for (way, &stamp) in stamps.iter().enumerate().skip(1) {
            if stamp < stamps[victim] {
                victim = way;
            }
        }
        victim
    }

    fn reset(&mut self) {
        self.last_used.fill(0);
    }
}
