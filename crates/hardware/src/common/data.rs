//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Latency Selection:** Each level charges its read or write cost depending on the access.
//! 2. **Dirty Tracking:** Writes mark the resident line dirty; reads leave it clean.
//! 3. **Statistics Tracking:** Hits and misses are counted separately per access type.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Copies bytes out of the hierarchy into the caller's buffer.
    Read,

    /// Data write access.
    ///
    /// Copies bytes from the caller's buffer into the hierarchy.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
