//! Simulation statistics collection and reporting.
//!
//! This module tracks what happened inside the hierarchy. It provides:
//! 1. **Cache counters:** Read/write hits and misses and dirty write-backs per level.
//! 2. **DRAM counters:** Block reads and writes reaching the backing store.
//! 3. **Report:** A `HierarchyStats` snapshot that renders as a text table.
//!
//! Counters never influence simulated time. They are cleared by `init_cache`,
//! not by `reset_time`.

use std::fmt;

use crate::common::AccessType;

/// Per-level cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads (word or block) that found their line resident.
    pub read_hits: u64,
    /// Reads that had to fetch their line from the level below.
    pub read_misses: u64,
    /// Writes that found their line resident.
    pub write_hits: u64,
    /// Writes that had to fetch their line from the level below.
    pub write_misses: u64,
    /// Dirty lines written back to the level below on eviction.
    pub writebacks: u64,
}

impl CacheStats {
    /// Counts a hit of the given access type.
    #[inline]
    pub const fn record_hit(&mut self, access: AccessType) {
        match access {
            AccessType::Read => self.read_hits += 1,
            AccessType::Write => self.write_hits += 1,
        }
    }

    /// Counts a miss of the given access type.
    #[inline]
    pub const fn record_miss(&mut self, access: AccessType) {
        match access {
            AccessType::Read => self.read_misses += 1,
            AccessType::Write => self.write_misses += 1,
        }
    }

    /// Total hits.
    pub const fn hits(&self) -> u64 {
        self.read_hits + self.write_hits
    }

    /// Total misses.
    pub const fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Total accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Hit rate in `[0, 1]`; `0.0` when there were no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

/// DRAM counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DramStats {
    /// Blocks read by the level above.
    pub block_reads: u64,
    /// Blocks written back by the level above.
    pub block_writes: u64,
}

/// Snapshot of every counter in a hierarchy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchyStats {
    /// `(name, counters)` for each cache level, top first.
    pub levels: Vec<(String, CacheStats)>,
    /// Backing store counters.
    pub dram: DramStats,
    /// Simulated time when the snapshot was taken.
    pub time: u32,
}

impl HierarchyStats {
    /// Returns the counters of the level called `name`.
    pub fn level(&self, name: &str) -> Option<&CacheStats> {
        self.levels
            .iter()
            .find(|(level, _)| level == name)
            .map(|(_, stats)| stats)
    }
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "MEMORY HIERARCHY STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_time                 {}", self.time)?;
        writeln!(f, "----------------------------------------------------------")?;
        for (name, s) in &self.levels {
            writeln!(
                f,
                "  {:<6} accesses {:>8}  hits {:>8}  misses {:>8}  ({:.2}% hit)",
                name,
                s.accesses(),
                s.hits(),
                s.misses(),
                s.hit_rate() * 100.0
            )?;
            writeln!(
                f,
                "         reads {:>5}/{:<5} writes {:>5}/{:<5} writebacks {}",
                s.read_hits, s.read_misses, s.write_hits, s.write_misses, s.writebacks
            )?;
        }
        writeln!(
            f,
            "  DRAM   block reads {:>8}  block writes {:>8}",
            self.dram.block_reads, self.dram.block_writes
        )?;
        write!(f, "==========================================================")
    }
}
