//! Test harness: ready-to-use hierarchies.
//!
//! Every constructor returns a hierarchy that has been through `init_cache` and
//! `reset_time`, i.e., the state a fresh simulated program sees.

use cachesim_core::MemoryHierarchy;
use cachesim_core::config::HierarchyConfig;

/// Installs a test-friendly `tracing` subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Builds, initialises and zeroes the clock of a hierarchy.
pub fn fresh(config: &HierarchyConfig) -> MemoryHierarchy {
    init_tracing();
    let mut mem = MemoryHierarchy::new(config).unwrap();
    mem.init_cache();
    mem.reset_time();
    mem
}

/// The single direct-mapped level layout.
pub fn l1_only() -> MemoryHierarchy {
    fresh(&HierarchyConfig::l1_only())
}

/// Two direct-mapped levels.
pub fn two_level() -> MemoryHierarchy {
    fresh(&HierarchyConfig::two_level())
}

/// Direct-mapped L1 over a 2-way LRU L2.
pub fn two_level_two_way() -> MemoryHierarchy {
    fresh(&HierarchyConfig::two_level_two_way())
}

/// Returns the time a single operation took.
pub fn timed<F: FnOnce(&mut MemoryHierarchy)>(mem: &mut MemoryHierarchy, op: F) -> u32 {
    let before = mem.get_time();
    op(mem);
    mem.get_time().wrapping_sub(before)
}
