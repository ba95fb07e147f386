//! Memory controller implementations for latency modeling.
//!
//! The DRAM asks its controller what an access costs. The only controller shipped is
//! `SimpleController`, which charges a fixed cost per block read and a (possibly different)
//! fixed cost per block write, independent of the address.

use crate::common::AccessType;

/// Trait for memory controller implementations that report access latency.
pub trait MemoryController: Send + std::fmt::Debug {
    /// Returns the time units required for an access to the given address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address being accessed (unused by fixed-latency controllers).
    /// * `access` - Whether the block is being read or written.
    fn access_latency(&mut self, addr: u32, access: AccessType) -> u32;
}

/// Fixed-latency memory controller; every read and every write costs the same.
#[derive(Debug, Clone, Copy)]
pub struct SimpleController {
    read_latency: u32,
    write_latency: u32,
}

impl SimpleController {
    /// Creates a controller with the given read and write costs.
    pub const fn new(read_latency: u32, write_latency: u32) -> Self {
        Self {
            read_latency,
            write_latency,
        }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _addr: u32, access: AccessType) -> u32 {
        match access {
            AccessType::Read => self.read_latency,
            AccessType::Write => self.write_latency,
        }
    }
}
