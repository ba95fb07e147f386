//! Statistics Tests.
//!
//! Verifies the counters a short, hand-traced access sequence produces and the
//! rendered report.

use cachesim_core::stats::{CacheStats, DramStats, HierarchyStats};
use pretty_assertions::assert_eq;

use crate::common::harness::{l1_only, two_level};

#[test]
fn l1_only_sequence_counters() {
    let mut mem = l1_only();
    let _ = mem.read_u32(0x0000); // miss
    let _ = mem.read_u32(0x0000); // hit
    mem.write_u32(0x0004, 3); // hit, dirties the line
    let _ = mem.read_u32(0x4000); // miss, write-back

    let expected = HierarchyStats {
        levels: vec![(
            "L1".to_owned(),
            CacheStats {
                read_hits: 1,
                read_misses: 2,
                write_hits: 1,
                write_misses: 0,
                writebacks: 1,
            },
        )],
        dram: DramStats {
            block_reads: 2,
            block_writes: 1,
        },
        time: 101 + 1 + 1 + 151,
    };
    assert_eq!(mem.stats(), expected);
}

#[test]
fn lower_levels_only_see_misses() {
    let mut mem = two_level();
    for _ in 0..4 {
        let _ = mem.read_u32(0x0100);
    }
    mem.write_u32(0x0200, 1);

    let stats = mem.stats();
    let l1 = stats.level("L1").unwrap();
    let l2 = stats.level("L2").unwrap();
    assert_eq!((l1.read_hits, l1.read_misses, l1.write_misses), (3, 1, 1));
    assert_eq!((l2.read_hits, l2.read_misses), (0, 2));
    assert_eq!(l2.write_hits + l2.write_misses, 0);
    assert_eq!(stats.dram.block_reads, 2);
}

#[test]
fn reset_time_keeps_counters() {
    let mut mem = l1_only();
    let _ = mem.read_u32(0x0);
    mem.reset_time();
    let stats = mem.stats();
    assert_eq!(stats.time, 0);
    assert_eq!(stats.level("L1").unwrap().read_misses, 1);
}

#[test]
fn unknown_level_is_none() {
    assert!(l1_only().stats().level("L3").is_none());
}

#[test]
fn report_names_every_level() {
    let mut mem = two_level();
    let _ = mem.read_u32(0x0);
    let report = mem.stats().to_string();

    assert!(report.contains("MEMORY HIERARCHY STATISTICS"));
    assert!(report.contains("sim_time                 111"));
    assert!(report.contains("L1"));
    assert!(report.contains("L2"));
    assert!(report.contains("DRAM   block reads        1"));
}
