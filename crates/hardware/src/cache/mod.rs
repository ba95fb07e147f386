//! Write-back Cache Level.
//!
//! This module implements one level of the cache hierarchy. A level is an array of
//! `sets × ways` lines in front of another `Storage` (a lower cache or the DRAM). It
//! models:
//! 1. **Lookup:** Decoding the address against the level's geometry and scanning the set.
//! 2. **Fill:** Fetching the whole block from the level below on a miss.
//! 3. **Write-back:** Writing a dirty victim's block to the level below, at the victim's
//!    own address, before its line is reused.
//! 4. **Timing:** Charging the level's read or write latency after any lower-level cost.
//!
//! Single-way levels are direct-mapped. Multi-way levels fill invalid ways first and
//! otherwise ask their `ReplacementPolicy` (LRU by default) for a victim.

/// Cache replacement policy implementations (LRU, direct-mapped).
pub mod policies;

use std::fmt;

use self::policies::{DirectMappedPolicy, LruPolicy, ReplacementPolicy};
use crate::common::{AccessType, ConfigError, DecodedAddr, Geometry};
use crate::config::LevelConfig;
use crate::stats::CacheStats;
use crate::storage::Storage;
use crate::timing::TimeCounter;

/// Cache line entry: tag, validity and dirty bits, and the block contents.
///
/// `dirty` implies `valid`.
#[derive(Clone, Debug)]
struct CacheLine {
    tag: u32,
    valid: bool,
    dirty: bool,
    data: Box<[u8]>,
}

impl CacheLine {
    fn new(block_size: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            data: vec![0; block_size].into_boxed_slice(),
        }
    }

    fn clear(&mut self) {
        self.tag = 0;
        self.valid = false;
        self.dirty = false;
        self.data.fill(0);
    }
}

/// State of a block within one cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// The block is not resident in this level.
    Invalid,
    /// The block is resident and matches the level below.
    Clean,
    /// The block is resident and has been written since it was filled.
    Dirty,
}

/// A transfer requested of a cache level: bytes to copy out or bytes to copy in.
enum Transfer<'a> {
    Read(&'a mut [u8]),
    Write(&'a [u8]),
}

impl Transfer<'_> {
    fn access_type(&self) -> AccessType {
        match self {
            Self::Read(_) => AccessType::Read,
            Self::Write(_) => AccessType::Write,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Read(buf) => buf.len(),
            Self::Write(data) => data.len(),
        }
    }
}

/// One level of a write-back, write-allocate cache.
pub struct CacheLevel {
    name: String,
    geometry: Geometry,
    ways: usize,
    read_latency: u32,
    write_latency: u32,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
    next: Box<dyn Storage>,
    stats: CacheStats,
}

impl CacheLevel {
    /// Creates a cache level in front of `next`.
    ///
    /// The level holds `config.size_bytes / block_size` lines grouped into sets of
    /// `config.ways`. Direct-mapped levels get [`DirectMappedPolicy`]; all others
    /// get [`LruPolicy`].
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity, associativity and latencies of the level.
    /// * `block_size` - Bytes per block, shared with the rest of the hierarchy.
    /// * `next` - The level below (another cache or the DRAM).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the size, associativity or resulting set
    /// count is not a non-zero power of two, or if the geometry does not fit in
    /// 32-bit addresses.
    pub fn new(
        config: &LevelConfig,
        block_size: usize,
        next: Box<dyn Storage>,
    ) -> Result<Self, ConfigError> {
        for (what, value) in [
            ("size_bytes", config.size_bytes),
            ("ways", config.ways),
            ("block_size", block_size),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo {
                    what: format!("level `{}` {}", config.name, what),
                    value,
                });
            }
        }

        let num_lines = config.size_bytes / block_size;
        let num_sets = num_lines / config.ways;
        if num_sets == 0 {
            return Err(ConfigError::LevelTooSmall {
                level: config.name.clone(),
                size_bytes: config.size_bytes,
                ways: config.ways,
                block_size,
            });
        }

        let geometry = u32::try_from(block_size)
            .ok()
            .zip(u32::try_from(num_sets).ok())
            .and_then(|(block, sets)| Geometry::new(block, sets))
            .ok_or_else(|| ConfigError::LevelTooLarge {
                level: config.name.clone(),
            })?;

        let policy: Box<dyn ReplacementPolicy> = if config.ways == 1 {
            Box::new(DirectMappedPolicy)
        } else {
            Box::new(LruPolicy::new(num_sets, config.ways))
        };

        tracing::debug!(
            "{}: {} sets x {} ways x {} B, latency r{}/w{}",
            config.name,
            num_sets,
            config.ways,
            block_size,
            config.read_latency,
            config.write_latency
        );

        Ok(Self {
            name: config.name.clone(),
            geometry,
            ways: config.ways,
            read_latency: config.read_latency,
            write_latency: config.write_latency,
            lines: vec![CacheLine::new(block_size); num_sets * config.ways],
            policy,
            next,
            stats: CacheStats::default(),
        })
    }

    /// Replaces the replacement policy, discarding any recorded usage.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn ReplacementPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the level's geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the hit/miss counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Returns the state of the block containing `addr` in this level.
    pub fn line_state(&self, addr: u32) -> LineState {
        let DecodedAddr { tag, index, .. } = self.geometry.decode(addr);
        match self.lookup(index as usize, tag) {
            Some(way) if self.lines[self.line_idx(index as usize, way)].dirty => LineState::Dirty,
            Some(_) => LineState::Clean,
            None => LineState::Invalid,
        }
    }

    /// Returns the way holding the block containing `addr`, if it is resident.
    pub fn resident_way(&self, addr: u32) -> Option<usize> {
        let DecodedAddr { tag, index, .. } = self.geometry.decode(addr);
        self.lookup(index as usize, tag)
    }

    #[inline]
    const fn line_idx(&self, set: usize, way: usize) -> usize {
        set * self.ways + way
    }

    fn lookup(&self, set: usize, tag: u32) -> Option<usize> {
        let base = self.line_idx(set, 0);
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    fn choose_victim(&mut self, set: usize) -> usize {
        let base = self.line_idx(set, 0);
        self.lines[base..base + self.ways]
            .iter()
            .position(|line| !line.valid)
            .unwrap_or_else(|| self.policy.get_victim(set))
    }

    /// Makes the block containing `addr` resident in `set`, returning its way.
    ///
    /// A dirty victim is written back at the address formed from its own tag.
    /// The new line is stamped with the time after the lower levels have been
    /// charged but before this level's own latency.
    fn fill(&mut self, addr: u32, set: usize, tag: u32, clock: &mut TimeCounter) -> usize {
        let way = self.choose_victim(set);
        let idx = self.line_idx(set, way);
        let line = &mut self.lines[idx];

        if line.dirty {
            let victim_addr = self.geometry.compose(line.tag, set as u32, 0);
            tracing::debug!(
                "{}: write back dirty block {:#x} from set {} way {}",
                self.name,
                victim_addr,
                set,
                way
            );
            self.stats.writebacks += 1;
            self.next.write(victim_addr, &line.data, clock);
        } else if line.valid {
            tracing::trace!(
                "{}: evict clean block {:#x}",
                self.name,
                self.geometry.compose(line.tag, set as u32, 0)
            );
        }

        let block_addr = self.geometry.block_base(addr);
        self.next.read(block_addr, &mut line.data, clock);
        line.valid = true;
        line.dirty = false;
        line.tag = tag;
        self.policy.update(set, way, clock.now());
        way
    }

    fn access(&mut self, addr: u32, transfer: Transfer<'_>, clock: &mut TimeCounter) {
        let access = transfer.access_type();
        let len = transfer.len();
        let DecodedAddr { tag, index, offset } = self.geometry.decode(addr);
        let (set, offset) = (index as usize, offset as usize);
        assert!(
            offset + len <= self.geometry.block_size() as usize,
            "{}: {}-byte {} at {:#x} crosses a block boundary",
            self.name,
            len,
            access,
            addr
        );

        let way = if let Some(way) = self.lookup(set, tag) {
            tracing::trace!("{}: {} hit {:#x}", self.name, access, addr);
            self.stats.record_hit(access);
            self.policy.update(set, way, clock.now());
            way
        } else {
            tracing::debug!("{}: {} miss {:#x}", self.name, access, addr);
            self.stats.record_miss(access);
            self.fill(addr, set, tag, clock)
        };

        let idx = self.line_idx(set, way);
        let line = &mut self.lines[idx];
        let bytes = &mut line.data[offset..offset + len];
        match transfer {
            Transfer::Read(buf) => {
                buf.copy_from_slice(bytes);
                clock.advance(self.read_latency);
            }
            Transfer::Write(data) => {
                bytes.copy_from_slice(data);
                line.dirty = true;
                clock.advance(self.write_latency);
            }
        }
    }
}

impl Storage for CacheLevel {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self, addr: u32, buf: &mut [u8], clock: &mut TimeCounter) {
        self.access(addr, Transfer::Read(buf), clock);
    }

    fn write(&mut self, addr: u32, data: &[u8], clock: &mut TimeCounter) {
        self.access(addr, Transfer::Write(data), clock);
    }

    fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.policy.reset();
        self.stats = CacheStats::default();
        self.next.clear();
    }

    fn next_level(&self) -> Option<&dyn Storage> {
        Some(self.next.as_ref())
    }

    fn as_cache(&self) -> Option<&CacheLevel> {
        Some(self)
    }
}

impl fmt::Debug for CacheLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLevel")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("ways", &self.ways)
            .field("read_latency", &self.read_latency)
            .field("write_latency", &self.write_latency)
            .field("policy", &self.policy)
            .field("next", &self.next.name())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
