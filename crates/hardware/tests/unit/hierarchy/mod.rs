//! End-to-end hierarchy tests.

/// Cold-miss, warm-hit and lower-level-hit costs.
pub mod timing;
