//! CPU memory hierarchy simulator library.
//!
//! This crate implements a functional (not cycle-accurate) model of a cache hierarchy with:
//! 1. **Caches:** Write-back, write-allocate levels, direct-mapped or set-associative with LRU.
//! 2. **Memory:** A bounds-checked DRAM backing store with fixed read and write costs.
//! 3. **Timing:** A single time counter charged by every level an access touches.
//! 4. **Configuration:** Reference presets and JSON-deserializable layouts.
//! 5. **Statistics:** Per-level hit, miss and write-back counters.
//!
//! The entry point is [`MemoryHierarchy`]: build it from a [`HierarchyConfig`], call
//! `init_cache`, then issue word-sized `read`/`write` calls and observe `get_time`.
//! An access outside the DRAM is a hardware fault and panics.

/// Cache levels and replacement policies.
pub mod cache;
/// Common types and constants (address decoding, access types, errors).
pub mod common;
/// Hierarchy configuration (defaults, presets, JSON structures).
pub mod config;
/// The top-level hierarchy type.
pub mod hierarchy;
/// DRAM backing store and its latency model.
pub mod memory;
/// Hit/miss statistics and reporting.
pub mod stats;
/// The `Storage` trait shared by caches and DRAM.
pub mod storage;
/// Simulated time counter.
pub mod timing;

/// Root configuration type; use a preset such as `HierarchyConfig::two_level()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Main simulator type; owns the caches, the DRAM and the time counter.
pub use crate::hierarchy::MemoryHierarchy;
