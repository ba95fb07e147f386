//! Backing Store (DRAM).
//!
//! This module implements the terminal level of the hierarchy. It provides:
//! 1. **Buffer:** Zeroed byte storage with bounds-checked slices (`DramBuffer`).
//! 2. **Controller:** Latency model charged per access (`SimpleController`).
//! 3. **Dram:** The `Storage` implementation caches fetch from and write back to.
//!
//! An access whose byte range is not inside the DRAM is a hardware fault: the simulation
//! panics before any byte is copied or any time is charged.

/// DRAM byte storage.
pub mod buffer;

/// Memory controller implementations for access latency modeling.
pub mod controller;

use self::buffer::DramBuffer;
use self::controller::MemoryController;
use crate::common::AccessType;
use crate::stats::DramStats;
use crate::storage::Storage;
use crate::timing::TimeCounter;

/// Main memory at the bottom of the hierarchy.
#[derive(Debug)]
pub struct Dram {
    buffer: DramBuffer,
    controller: Box<dyn MemoryController>,
    stats: DramStats,
}

impl Dram {
    /// Creates a zeroed DRAM of `size` bytes timed by `controller`.
    pub fn new(size: usize, controller: Box<dyn MemoryController>) -> Self {
        Self {
            buffer: DramBuffer::new(size),
            controller,
            stats: DramStats::default(),
        }
    }

    /// Returns the DRAM size in bytes.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `len` bytes at `addr` without charging time or counting an access.
    ///
    /// Intended for inspection (tests, dumps); simulated programs go through the caches.
    pub fn peek(&self, addr: u32, len: usize) -> &[u8] {
        self.buffer.read_slice(addr as usize, len)
    }

    /// Returns the access counters.
    pub const fn stats(&self) -> &DramStats {
        &self.stats
    }
}

impl Storage for Dram {
    fn name(&self) -> &str {
        "DRAM"
    }

    fn read(&mut self, addr: u32, buf: &mut [u8], clock: &mut TimeCounter) {
        buf.copy_from_slice(self.buffer.read_slice(addr as usize, buf.len()));
        self.stats.block_reads += 1;
        clock.advance(self.controller.access_latency(addr, AccessType::Read));
        tracing::trace!("DRAM read {:#x} ({} bytes)", addr, buf.len());
    }

    fn write(&mut self, addr: u32, data: &[u8], clock: &mut TimeCounter) {
        self.buffer.write_slice(addr as usize, data);
        self.stats.block_writes += 1;
        clock.advance(self.controller.access_latency(addr, AccessType::Write));
        tracing::trace!("DRAM write {:#x} ({} bytes)", addr, data.len());
    }

    fn clear(&mut self) {
        self.buffer.fill_zero();
        self.stats = DramStats::default();
    }

    fn as_dram(&self) -> Option<&Dram> {
        Some(self)
    }
}
