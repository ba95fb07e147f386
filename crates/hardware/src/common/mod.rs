//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Decoding:** Cache geometry and `(tag, index, offset)` splitting.
//! 2. **Constants:** Reference word/block sizes, capacities and latencies.
//! 3. **Memory Access:** Classification of operations into reads and writes.
//! 4. **Error Handling:** Configuration errors reported at construction time.

/// Address decoding against a cache geometry.
pub mod addr;

/// Reference sizes and latencies.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Configuration error types.
pub mod error;

pub use addr::{DecodedAddr, Geometry};
pub use constants::{BLOCK_SIZE, WORD_SIZE};
pub use data::AccessType;
pub use error::ConfigError;
