//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a hierarchy.
//! It provides:
//! 1. **Defaults:** Reference sizes and latencies (see `common::constants`).
//! 2. **Structures:** Hierarchy-wide transfer sizes, an ordered list of cache levels, and DRAM.
//! 3. **Presets:** The three canonical layouts (L1 only, two direct-mapped levels, and a
//!    direct-mapped L1 over a 2-way LRU L2).
//!
//! Configuration is built in code (`HierarchyConfig::two_level()`, ...) or deserialized
//! from JSON with `HierarchyConfig::from_json`. Validation happens when the hierarchy is
//! constructed, not here.

use serde::Deserialize;

use crate::common::constants;

/// Default configuration constants for the simulator.
mod defaults {
    use super::constants;

    /// Bytes per word moved between the hierarchy and its caller.
    pub const WORD_SIZE: usize = constants::WORD_SIZE;

    /// Bytes per block moved between levels.
    pub const BLOCK_SIZE: usize = constants::BLOCK_SIZE;

    /// DRAM capacity in bytes.
    pub const DRAM_SIZE: usize = constants::DRAM_SIZE;

    /// DRAM block read cost.
    pub const DRAM_READ_TIME: u32 = constants::DRAM_READ_TIME;

    /// DRAM block write cost.
    pub const DRAM_WRITE_TIME: u32 = constants::DRAM_WRITE_TIME;

    /// Default level capacity (the L1 size).
    pub const LEVEL_SIZE: usize = constants::L1_SIZE;

    /// Default associativity (direct-mapped).
    pub const LEVEL_WAYS: usize = 1;

    /// Default level read cost (the L1 read time).
    pub const LEVEL_READ_TIME: u32 = constants::L1_READ_TIME;

    /// Default level write cost (the L1 write time).
    pub const LEVEL_WRITE_TIME: u32 = constants::L1_WRITE_TIME;
}

/// Root configuration structure describing a whole hierarchy.
///
/// # Examples
///
/// Using a preset:
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let config = HierarchyConfig::two_level_two_way();
/// assert_eq!(config.levels.len(), 2);
/// assert_eq!(config.levels[1].ways, 2);
/// ```
///
/// Deserializing from JSON (omitted fields take their defaults):
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "block_size": 64,
///     "levels": [
///         { "name": "L1", "size_bytes": 16384, "read_latency": 1, "write_latency": 1 },
///         { "name": "L2", "size_bytes": 32768, "ways": 2, "read_latency": 10, "write_latency": 10 }
///     ],
///     "dram": { "size_bytes": 65536, "read_latency": 100, "write_latency": 50 }
/// }"#;
///
/// let config = HierarchyConfig::from_json(json).unwrap();
/// assert_eq!(config.word_size, 4);
/// assert_eq!(config.levels[1].ways, 2);
/// assert_eq!(config.dram.write_latency, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HierarchyConfig {
    /// Bytes per `read`/`write` at the hierarchy boundary.
    #[serde(default = "HierarchyConfig::default_word_size")]
    pub word_size: usize,

    /// Bytes per block; shared by every level so blocks move between levels unchanged.
    #[serde(default = "HierarchyConfig::default_block_size")]
    pub block_size: usize,

    /// Cache levels, closest to the CPU first.
    pub levels: Vec<LevelConfig>,

    /// Backing store.
    #[serde(default)]
    pub dram: DramConfig,
}

impl HierarchyConfig {
    /// Returns the default word size in bytes.
    fn default_word_size() -> usize {
        defaults::WORD_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    fn with_levels(levels: Vec<LevelConfig>) -> Self {
        Self {
            word_size: defaults::WORD_SIZE,
            block_size: defaults::BLOCK_SIZE,
            levels,
            dram: DramConfig::default(),
        }
    }

    /// A single direct-mapped L1 in front of DRAM.
    pub fn l1_only() -> Self {
        Self::with_levels(vec![LevelConfig::l1()])
    }

    /// Direct-mapped L1 and direct-mapped L2 in front of DRAM.
    pub fn two_level() -> Self {
        Self::with_levels(vec![LevelConfig::l1(), LevelConfig::l2(1)])
    }

    /// Direct-mapped L1 and 2-way set-associative LRU L2 in front of DRAM.
    pub fn two_level_two_way() -> Self {
        Self::with_levels(vec![
            LevelConfig::l1(),
            LevelConfig::l2(constants::L2_WAYS),
        ])
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown fields or
    /// missing `levels`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for HierarchyConfig {
    /// The most general reference layout: [`HierarchyConfig::two_level_two_way`].
    fn default() -> Self {
        Self::two_level_two_way()
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Name used in logs and statistics (e.g., `"L1"`).
    pub name: String,

    /// Total capacity in bytes
    #[serde(default = "LevelConfig::default_size")]
    pub size_bytes: usize,

    /// Associativity (number of ways); `1` is direct-mapped
    #[serde(default = "LevelConfig::default_ways")]
    pub ways: usize,

    /// Cost of a read served by this level
    #[serde(default = "LevelConfig::default_read_latency")]
    pub read_latency: u32,

    /// Cost of a write served by this level
    #[serde(default = "LevelConfig::default_write_latency")]
    pub write_latency: u32,
}

impl LevelConfig {
    /// Returns the default level size in bytes.
    fn default_size() -> usize {
        defaults::LEVEL_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::LEVEL_WAYS
    }

    /// Returns the default read cost.
    fn default_read_latency() -> u32 {
        defaults::LEVEL_READ_TIME
    }

    /// Returns the default write cost.
    fn default_write_latency() -> u32 {
        defaults::LEVEL_WRITE_TIME
    }

    /// The reference direct-mapped L1: 256 lines, 1/1 latency.
    pub fn l1() -> Self {
        Self {
            name: "L1".to_owned(),
            size_bytes: constants::L1_SIZE,
            ways: 1,
            read_latency: constants::L1_READ_TIME,
            write_latency: constants::L1_WRITE_TIME,
        }
    }

    /// The reference L2: 512 lines arranged in `ways` ways, 10/10 latency.
    pub fn l2(ways: usize) -> Self {
        Self {
            name: "L2".to_owned(),
            size_bytes: constants::L2_SIZE,
            ways,
            read_latency: constants::L2_READ_TIME,
            write_latency: constants::L2_WRITE_TIME,
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DramConfig {
    /// Capacity in bytes
    #[serde(default = "DramConfig::default_size")]
    pub size_bytes: usize,

    /// Cost of reading one block
    #[serde(default = "DramConfig::default_read_latency")]
    pub read_latency: u32,

    /// Cost of writing one block
    #[serde(default = "DramConfig::default_write_latency")]
    pub write_latency: u32,
}

impl DramConfig {
    /// Returns the default DRAM size in bytes.
    fn default_size() -> usize {
        defaults::DRAM_SIZE
    }

    /// Returns the default block read cost.
    fn default_read_latency() -> u32 {
        defaults::DRAM_READ_TIME
    }

    /// Returns the default block write cost.
    fn default_write_latency() -> u32 {
        defaults::DRAM_WRITE_TIME
    }
}

impl Default for DramConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::DRAM_SIZE,
            read_latency: defaults::DRAM_READ_TIME,
            write_latency: defaults::DRAM_WRITE_TIME,
        }
    }
}
