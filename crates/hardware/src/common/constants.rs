//! Hierarchy-wide Constants.
//!
//! This module defines the fixed sizes and latencies of the reference hierarchy. They are:
//! 1. **Transfer Units:** Word and block sizes shared by every level.
//! 2. **Capacities:** DRAM and per-level cache sizes, expressed in blocks.
//! 3. **Latencies:** Read and write costs for each level and for DRAM, in time units.
//!
//! The `config` module uses these as defaults; a `HierarchyConfig` may override any of them.

/// Size of a word in bytes; the unit of `read`/`write` at the hierarchy boundary.
pub const WORD_SIZE: usize = 4;

/// Number of words per cache block.
pub const WORDS_PER_BLOCK: usize = 16;

/// Size of a cache block in bytes; the unit of transfer between levels.
pub const BLOCK_SIZE: usize = WORD_SIZE * WORDS_PER_BLOCK;

/// Size of the backing DRAM in bytes (64 KiB).
pub const DRAM_SIZE: usize = 1024 * BLOCK_SIZE;

/// Size of the first-level cache in bytes (256 lines).
pub const L1_SIZE: usize = 256 * BLOCK_SIZE;

/// Size of the second-level cache in bytes (512 lines).
pub const L2_SIZE: usize = 512 * BLOCK_SIZE;

/// Associativity of the set-associative second level.
pub const L2_WAYS: usize = 2;

/// Cost of an L1 read.
pub const L1_READ_TIME: u32 = 1;

/// Cost of an L1 write.
pub const L1_WRITE_TIME: u32 = 1;

/// Cost of an L2 read.
pub const L2_READ_TIME: u32 = 10;

/// Cost of an L2 write.
pub const L2_WRITE_TIME: u32 = 10;

/// Cost of a DRAM block read.
pub const DRAM_READ_TIME: u32 = 100;

/// Cost of a DRAM block write.
pub const DRAM_WRITE_TIME: u32 = 50;
