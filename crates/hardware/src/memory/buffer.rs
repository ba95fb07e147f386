//! DRAM Buffer Implementation.
//!
//! This module provides the byte array backing the simulated DRAM. Every access is
//! bounds-checked; a range that does not lie entirely inside the buffer is a bus fault
//! and aborts the simulation.

/// Flat, zero-initialised byte storage.
#[derive(Debug, Clone)]
pub struct DramBuffer {
    bytes: Vec<u8>,
}

impl DramBuffer {
    /// Creates a zeroed buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Zeroes the whole buffer.
    pub fn fill_zero(&mut self) {
        self.bytes.fill(0);
    }

    /// Returns the byte range `[offset, offset + len)`.
    ///
    /// Panics with `"DRAM access out of bounds"` if the range leaves the buffer.
    pub fn read_slice(&self, offset: usize, len: usize) -> &[u8] {
        let end = self.checked_end(offset, len);
        &self.bytes[offset..end]
    }

    /// Copies `data` into the buffer at `offset`.
    ///
    /// Panics with `"DRAM access out of bounds"` if the range leaves the buffer;
    /// nothing is written in that case.
    pub fn write_slice(&mut self, offset: usize, data: &[u8]) {
        let end = self.checked_end(offset, data.len());
        self.bytes[offset..end].copy_from_slice(data);
    }

    fn checked_end(&self, offset: usize, len: usize) -> usize {
        match offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => end,
            _ => panic!(
                "DRAM access out of bounds: {:#x}+{} exceeds {} bytes",
                offset,
                len,
                self.bytes.len()
            ),
        }
    }
}
