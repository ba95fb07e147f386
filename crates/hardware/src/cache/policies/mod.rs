//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a full cache set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, driven by simulated-time stamps.
//! - `DirectMapped`: Single-way sets; the only way is always the victim.
//!
//! A policy is consulted only when every way of the set is valid; the cache
//! level fills invalid ways first.

/// Direct-mapped (single way) policy.
pub mod direct;

/// Least Recently Used replacement policy.
pub mod lru;

pub use direct::DirectMappedPolicy;
pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for recording line usage and selecting victim lines.
pub trait ReplacementPolicy: Send + std::fmt::Debug {
    /// Records that `way` of `set` was filled or hit at simulated time `now`.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    /// * `now` - Current value of the hierarchy's time counter.
    fn update(&mut self, set: usize, way: usize, now: u32);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Forgets all recorded usage.
    fn reset(&mut self);
}
