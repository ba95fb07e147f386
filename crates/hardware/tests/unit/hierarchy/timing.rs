//! Hierarchy Timing Tests.
//!
//! Checks that `get_time` advances by exactly the latencies of the levels an
//! access touches, using the reference constants.

use cachesim_core::common::constants::{
    DRAM_READ_TIME, DRAM_WRITE_TIME, L1_READ_TIME, L1_WRITE_TIME, L2_READ_TIME, L2_WRITE_TIME,
};
use cachesim_core::config::HierarchyConfig;
use rstest::rstest;

use crate::common::harness::{fresh, l1_only, timed, two_level, two_level_two_way};

/// A cold read pays every level's read latency down to DRAM.
#[rstest]
#[case::l1_only(HierarchyConfig::l1_only(), L1_READ_TIME + DRAM_READ_TIME)]
#[case::two_level(HierarchyConfig::two_level(), L1_READ_TIME + L2_READ_TIME + DRAM_READ_TIME)]
#[case::two_level_two_way(
    HierarchyConfig::two_level_two_way(),
    L1_READ_TIME + L2_READ_TIME + DRAM_READ_TIME
)]
fn cold_read_cost(#[case] config: HierarchyConfig, #[case] expected: u32) {
    let mut mem = fresh(&config);
    let _ = mem.read_u32(0x1230);
    assert_eq!(mem.get_time(), expected);
}

/// A second read of the same word is a pure L1 hit.
#[rstest]
#[case::l1_only(HierarchyConfig::l1_only())]
#[case::two_level(HierarchyConfig::two_level())]
#[case::two_level_two_way(HierarchyConfig::two_level_two_way())]
fn warm_read_cost(#[case] config: HierarchyConfig) {
    let mut mem = fresh(&config);
    let _ = mem.read_u32(0x1230);
    let cost = timed(&mut mem, |m| {
        let _ = m.read_u32(0x1230);
    });
    assert_eq!(cost, L1_READ_TIME);
}

#[test]
fn cold_write_fetches_then_writes() {
    let mut mem = two_level();
    let cost = timed(&mut mem, |m| m.write_u32(0x40, 7));
    assert_eq!(cost, DRAM_READ_TIME + L2_READ_TIME + L1_WRITE_TIME);

    let cost = timed(&mut mem, |m| m.write_u32(0x44, 8));
    assert_eq!(cost, L1_WRITE_TIME);
}

#[test]
fn other_word_of_resident_block_hits() {
    let mut mem = l1_only();
    let _ = mem.read_u32(0x100);
    let cost = timed(&mut mem, |m| {
        let _ = m.read_u32(0x13C);
    });
    assert_eq!(cost, L1_READ_TIME);
}

/// After an L1 conflict the block is still in L2.
#[test]
fn l2_hit_after_l1_conflict() {
    let mut mem = two_level();
    let _ = mem.read_u32(0x0000);
    let _ = mem.read_u32(0x4000);
    let cost = timed(&mut mem, |m| {
        let _ = m.read_u32(0x0000);
    });
    assert_eq!(cost, L2_READ_TIME + L1_READ_TIME);
}

/// Evicting a dirty L1 line costs an L2 write before the fetch.
#[test]
fn dirty_l1_eviction_cost() {
    let mut mem = two_level_two_way();
    mem.write_u32(0x0000, 1);
    let cost = timed(&mut mem, |m| {
        let _ = m.read_u32(0x4000);
    });
    assert_eq!(
        cost,
        L2_WRITE_TIME + (DRAM_READ_TIME + L2_READ_TIME) + L1_READ_TIME
    );
}

/// L1-only: a dirty eviction goes straight to DRAM.
#[test]
fn dirty_eviction_to_dram_cost() {
    let mut mem = l1_only();
    mem.write_u32(0x0010, 1);
    let cost = timed(&mut mem, |m| {
        let _ = m.read_u32(0x4010);
    });
    assert_eq!(cost, DRAM_WRITE_TIME + DRAM_READ_TIME + L1_READ_TIME);
}
