//! Configuration Error definitions.
//!
//! This module defines the recoverable errors of the simulator. It provides:
//! 1. **Geometry Validation:** Sizes that are zero, not powers of two, or inconsistent.
//! 2. **Layout Validation:** Hierarchies without levels or with DRAM smaller than a block.
//!
//! Addressing faults at run time are not represented here: an access outside DRAM is
//! a hardware fault and terminates the simulation with a panic.

use thiserror::Error;

/// Invalid hierarchy configuration, reported by `MemoryHierarchy::new`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size that must be a non-zero power of two is not.
    #[error("{what} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        what: String,
        /// The rejected value.
        value: usize,
    },

    /// The word does not fit in a block.
    #[error("word size {word_size} exceeds block size {block_size}")]
    WordLargerThanBlock {
        /// Configured word size in bytes.
        word_size: usize,
        /// Configured block size in bytes.
        block_size: usize,
    },

    /// A level cannot hold a single full set of blocks.
    #[error("level `{level}`: {size_bytes} bytes cannot hold {ways} way(s) of {block_size}-byte blocks")]
    LevelTooSmall {
        /// Level name.
        level: String,
        /// Configured capacity in bytes.
        size_bytes: usize,
        /// Configured associativity.
        ways: usize,
        /// Block size in bytes.
        block_size: usize,
    },

    /// The level geometry needs more than 32 address bits.
    #[error("level `{level}`: geometry exceeds the 32-bit address space")]
    LevelTooLarge {
        /// Level name.
        level: String,
    },

    /// DRAM is not a whole number of blocks or exceeds the address space.
    #[error("DRAM size {size_bytes} is not a non-zero multiple of the {block_size}-byte block within 4 GiB")]
    InvalidDramSize {
        /// Configured DRAM size in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        block_size: usize,
    },

    /// The hierarchy has no cache level.
    #[error("hierarchy needs at least one cache level")]
    NoLevels,
}
