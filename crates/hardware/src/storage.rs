//! Storage trait for levels of the memory hierarchy.
//!
//! This module defines the `Storage` trait implemented by every component a cache can
//! sit in front of. It provides:
//! 1. **Identification:** `name` for logging and reports.
//! 2. **Access:** Read and write of a byte run at an absolute address, charged to a clock.
//! 3. **Lifecycle:** `clear` returning the component to its power-on state.
//! 4. **Traversal:** Downcasts and `next_level` so the hierarchy can be walked for inspection.
//!
//! Implementors must be `Send` so a whole hierarchy can move between threads. They are not
//! `Sync`-shared: every access needs `&mut self`.

use crate::cache::CacheLevel;
use crate::memory::Dram;
use crate::timing::TimeCounter;

/// A level of the memory hierarchy: a cache or the terminal DRAM.
///
/// Caches call their next level with whole blocks; the hierarchy calls the top
/// cache with single words. Implementations panic on transfers they cannot
/// service (out of bounds, crossing a block boundary) rather than truncating.
pub trait Storage: Send {
    /// Returns a short name for this level (e.g., `"L1"`, `"DRAM"`).
    fn name(&self) -> &str;

    /// Copies `buf.len()` bytes starting at `addr` into `buf`.
    fn read(&mut self, addr: u32, buf: &mut [u8], clock: &mut TimeCounter);

    /// Copies `data` into this level starting at `addr`.
    fn write(&mut self, addr: u32, data: &[u8], clock: &mut TimeCounter);

    /// Returns this level and every level below it to the zeroed start state.
    fn clear(&mut self);

    /// Returns the level below this one, or `None` for the terminal level.
    fn next_level(&self) -> Option<&dyn Storage> {
        None
    }

    /// Returns this level as a `CacheLevel` if it is one.
    fn as_cache(&self) -> Option<&CacheLevel> {
        None
    }

    /// Returns this level as the `Dram` if it is the backing store.
    fn as_dram(&self) -> Option<&Dram> {
        None
    }
}
