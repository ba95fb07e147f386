//! Memory hierarchy construction and the top-level `MemoryHierarchy` type.
//!
//! This module builds the complete hierarchy from configuration. It performs:
//! 1. **Validation:** Word, block and DRAM sizes are checked before anything is allocated.
//! 2. **Assembly:** The DRAM is created first and each cache level is stacked on top of the
//!    previous one, so the first configured level ends up closest to the caller.
//! 3. **Access:** Word-sized `read`/`write` enter the top level; misses recurse downwards.
//! 4. **Inspection:** Time, statistics, per-level line state and raw DRAM contents.

use std::iter;

use crate::cache::{CacheLevel, LineState};
use crate::common::ConfigError;
use crate::config::HierarchyConfig;
use crate::memory::Dram;
use crate::memory::controller::SimpleController;
use crate::stats::HierarchyStats;
use crate::storage::Storage;
use crate::timing::TimeCounter;

/// A CPU memory hierarchy: cache levels in front of a DRAM, plus a time counter.
///
/// Every access takes `&mut self` and runs to completion before returning; the
/// hierarchy has no internal synchronization. It is `Send`, so it can be moved
/// to another thread, but callers that want to share one instance between
/// threads must serialize access themselves (e.g., `Mutex<MemoryHierarchy>`).
///
/// # Examples
///
/// ```
/// use cachesim_core::MemoryHierarchy;
/// use cachesim_core::config::HierarchyConfig;
///
/// let mut mem = MemoryHierarchy::new(&HierarchyConfig::two_level()).unwrap();
/// mem.init_cache();
/// mem.reset_time();
///
/// mem.write(0x100, &[1, 2, 3, 4]);
/// let mut word = [0; 4];
/// mem.read(0x100, &mut word);
/// assert_eq!(word, [1, 2, 3, 4]);
/// assert!(mem.get_time() > 0);
/// ```
#[derive(Debug)]
pub struct MemoryHierarchy {
    config: HierarchyConfig,
    top: CacheLevel,
    clock: TimeCounter,
}

impl MemoryHierarchy {
    /// Builds a hierarchy from configuration.
    ///
    /// All lines start invalid and the DRAM starts zeroed, exactly as after
    /// [`init_cache`](Self::init_cache). The time counter starts at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if there is no cache level, if the word or
    /// block size is not a power of two, if a word is larger than a block, if the
    /// DRAM is not a whole number of blocks within the 32-bit address space, or
    /// if any level's geometry is invalid.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        let Some((first, lower)) = config.levels.split_first() else {
            return Err(ConfigError::NoLevels);
        };
        for (what, value) in [
            ("word_size", config.word_size),
            ("block_size", config.block_size),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo {
                    what: what.to_owned(),
                    value,
                });
            }
        }
        if config.word_size > config.block_size {
            return Err(ConfigError::WordLargerThanBlock {
                word_size: config.word_size,
                block_size: config.block_size,
            });
        }
        let dram_size = config.dram.size_bytes;
        if dram_size == 0
            || dram_size % config.block_size != 0
            || dram_size as u64 > u64::from(u32::MAX) + 1
        {
            return Err(ConfigError::InvalidDramSize {
                size_bytes: dram_size,
                block_size: config.block_size,
            });
        }

        let controller = SimpleController::new(config.dram.read_latency, config.dram.write_latency);
        let mut next: Box<dyn Storage> = Box::new(Dram::new(dram_size, Box::new(controller)));
        for level in lower.iter().rev() {
            next = Box::new(CacheLevel::new(level, config.block_size, next)?);
        }
        let top = CacheLevel::new(first, config.block_size, next)?;

        tracing::info!(
            "memory hierarchy: {} over {} B DRAM",
            config
                .levels
                .iter()
                .map(|l| format!("{}({}B/{}w)", l.name, l.size_bytes, l.ways))
                .collect::<Vec<_>>()
                .join(" > "),
            dram_size
        );

        Ok(Self {
            config: config.clone(),
            top,
            clock: TimeCounter::new(),
        })
    }

    /// Zeroes the DRAM and invalidates every line of every level.
    ///
    /// Tags, data, LRU stamps and statistics are cleared too. The time counter
    /// is left untouched; use [`reset_time`](Self::reset_time) for that.
    pub fn init_cache(&mut self) {
        self.top.clear();
        tracing::info!("cache and DRAM initialised");
    }

    /// Reads the word at `addr` into `buf`.
    ///
    /// Panics if `buf` is not exactly one word long, if the word crosses a block
    /// boundary, or if the block lies outside the DRAM.
    pub fn read(&mut self, addr: u32, buf: &mut [u8]) {
        self.check_word(buf.len());
        self.top.read(addr, buf, &mut self.clock);
    }

    /// Writes the word in `data` to `addr`.
    ///
    /// Panics under the same conditions as [`read`](Self::read).
    pub fn write(&mut self, addr: u32, data: &[u8]) {
        self.check_word(data.len());
        self.top.write(addr, data, &mut self.clock);
    }

    /// Reads a little-endian 32-bit word. Requires a 4-byte word size.
    pub fn read_u32(&mut self, addr: u32) -> u32 {
        let mut buf = [0; 4];
        self.read(addr, &mut buf);
        u32::from_le_bytes(buf)
    }

    /// Writes a little-endian 32-bit word. Requires a 4-byte word size.
    pub fn write_u32(&mut self, addr: u32, value: u32) {
        self.write(addr, &value.to_le_bytes());
    }

    /// Sets the time counter back to zero.
    ///
    /// LRU stamps are taken from this counter and are not cleared, so a line
    /// used just before the reset counts as more recent than one used after it.
    pub const fn reset_time(&mut self) {
        self.clock.reset();
    }

    /// Returns the simulated time accumulated since the last reset.
    pub const fn get_time(&self) -> u32 {
        self.clock.now()
    }

    /// Returns the configuration the hierarchy was built from.
    pub const fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Iterates over the cache levels, closest to the caller first.
    pub fn levels(&self) -> impl Iterator<Item = &CacheLevel> {
        self.storages().filter_map(Storage::as_cache)
    }

    /// Returns the cache level called `name`.
    pub fn level(&self, name: &str) -> Option<&CacheLevel> {
        self.levels().find(|level| level.name() == name)
    }

    /// Returns the state of the block containing `addr` in the level called `name`.
    pub fn line_state(&self, name: &str, addr: u32) -> Option<LineState> {
        self.level(name).map(|level| level.line_state(addr))
    }

    /// Returns the backing store.
    pub fn dram(&self) -> &Dram {
        match self.storages().find_map(Storage::as_dram) {
            Some(dram) => dram,
            None => unreachable!("every hierarchy terminates in DRAM"),
        }
    }

    /// Takes a snapshot of all counters and the current time.
    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            levels: self
                .levels()
                .map(|level| (level.name().to_owned(), *level.stats()))
                .collect(),
            dram: *self.dram().stats(),
            time: self.clock.now(),
        }
    }

    fn storages(&self) -> impl Iterator<Item = &dyn Storage> {
        iter::successors(Some(&self.top as &dyn Storage), |&level| level.next_level())
    }

    fn check_word(&self, len: usize) {
        assert_eq!(
            len, self.config.word_size,
            "buffer must be exactly one {}-byte word",
            self.config.word_size
        );
    }
}
