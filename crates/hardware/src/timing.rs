//! Simulated time accounting.
//!
//! Every cache level and the DRAM charge a fixed cost per access to a single
//! [`TimeCounter`] owned by the hierarchy. The counter is a latency proxy, not
//! wall-clock time: it only moves when an access is charged.

/// Monotonic counter of simulated time units.
///
/// Arithmetic wraps at `u32::MAX`, matching an unsigned 32-bit hardware counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeCounter {
    now: u32,
}

impl TimeCounter {
    /// Creates a counter at zero.
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Returns the current time.
    #[inline]
    pub const fn now(&self) -> u32 {
        self.now
    }

    /// Charges `cost` time units.
    #[inline]
    pub const fn advance(&mut self, cost: u32) {
        self.now = self.now.wrapping_add(cost);
    }

    /// Sets the counter back to zero.
    #[inline]
    pub const fn reset(&mut self) {
        self.now = 0;
    }
}
