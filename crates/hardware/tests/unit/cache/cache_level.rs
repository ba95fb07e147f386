//! Cache Level Unit Tests.
//!
//! Exercises a single `CacheLevel` in front of `RecordingStorage`, so every
//! block transfer the level issues to the next level can be checked: fetch on
//! miss, write-back of dirty victims at their own address, and timing.
//!
//! Test geometry: 256-byte level with 64-byte blocks.
//!   - direct-mapped: 4 sets, set = (addr / 64) % 4, tag = addr / 256
//!   - 2-way:         2 sets, set = (addr / 64) % 2, tag = addr / 128

use std::sync::{Arc, Mutex};

use cachesim_core::cache::policies::ReplacementPolicy;
use cachesim_core::cache::{CacheLevel, LineState};
use cachesim_core::common::AccessType;
use cachesim_core::config::LevelConfig;
use cachesim_core::storage::Storage;
use cachesim_core::timing::TimeCounter;
use pretty_assertions::assert_eq;

use crate::common::mocks::{RecordingStorage, Transfer, TransferLog};

const NEXT_LATENCY: u32 = 10;

fn level(ways: usize) -> (CacheLevel, TransferLog) {
    let (mock, log) = RecordingStorage::new(4096, NEXT_LATENCY);
    let config = LevelConfig {
        name: "L1".into(),
        size_bytes: 256,
        ways,
        read_latency: 1,
        write_latency: 2,
    };
    (CacheLevel::new(&config, 64, Box::new(mock)).unwrap(), log)
}

fn read(addr: u32) -> Transfer {
    Transfer {
        access: AccessType::Read,
        addr,
        len: 64,
    }
}

fn write(addr: u32) -> Transfer {
    Transfer {
        access: AccessType::Write,
        addr,
        len: 64,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Fill on miss
// ══════════════════════════════════════════════════════════

#[test]
fn cold_read_fetches_whole_block() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x48, &mut word, &mut clock);

    assert_eq!(*log.lock().unwrap(), vec![read(0x40)]);
    assert_eq!(clock.now(), NEXT_LATENCY + 1);
    assert_eq!(cache.line_state(0x48), LineState::Clean);
    assert_eq!(cache.stats().read_misses, 1);
}

#[test]
fn warm_read_stays_local() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x48, &mut word, &mut clock);
    clock.reset();
    cache.read(0x7C, &mut word, &mut clock);

    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(clock.now(), 1);
    assert_eq!(cache.stats().read_hits, 1);
}

#[test]
fn write_miss_allocates_dirty_line() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();

    cache.write(0x10, &[1, 2, 3, 4], &mut clock);

    assert_eq!(*log.lock().unwrap(), vec![read(0x00)]);
    assert_eq!(clock.now(), NEXT_LATENCY + 2);
    assert_eq!(cache.line_state(0x10), LineState::Dirty);

    let mut word = [0u8; 4];
    cache.read(0x10, &mut word, &mut clock);
    assert_eq!(word, [1, 2, 3, 4]);
}

#[test]
fn block_sized_transfer_from_upper_level() {
    let (mut cache, _log) = level(1);
    let mut clock = TimeCounter::new();
    let block: Vec<u8> = (0..64).collect();

    cache.write(0x80, &block, &mut clock);
    let mut out = [0u8; 64];
    cache.read(0x80, &mut out, &mut clock);
    assert_eq!(&out[..], &block[..]);
}

// ══════════════════════════════════════════════════════════
// 2. Eviction
// ══════════════════════════════════════════════════════════

/// The victim is written back at the address built from its own tag.
#[test]
fn dirty_victim_written_back_at_own_address() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.write(0x10, &[9, 9, 9, 9], &mut clock);
    clock.reset();
    cache.read(0x110, &mut word, &mut clock);

    assert_eq!(
        *log.lock().unwrap(),
        vec![read(0x000), write(0x000), read(0x100)]
    );
    assert_eq!(clock.now(), NEXT_LATENCY + NEXT_LATENCY + 1);
    assert_eq!(cache.line_state(0x10), LineState::Invalid);
    assert_eq!(cache.line_state(0x110), LineState::Clean);
    assert_eq!(cache.stats().writebacks, 1);
}

#[test]
fn clean_victim_is_dropped() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x10, &mut word, &mut clock);
    cache.read(0x110, &mut word, &mut clock);

    assert_eq!(*log.lock().unwrap(), vec![read(0x000), read(0x100)]);
    assert_eq!(cache.stats().writebacks, 0);
}

#[test]
fn write_hit_marks_clean_line_dirty() {
    let (mut cache, _log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x20, &mut word, &mut clock);
    assert_eq!(cache.line_state(0x20), LineState::Clean);
    cache.write(0x24, &[5, 5, 5, 5], &mut clock);
    assert_eq!(cache.line_state(0x20), LineState::Dirty);
    assert_eq!(cache.stats().write_hits, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Set-associative placement
// ══════════════════════════════════════════════════════════

#[test]
fn invalid_ways_fill_before_eviction() {
    let (mut cache, _log) = level(2);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x000, &mut word, &mut clock);
    cache.read(0x080, &mut word, &mut clock);

    assert_eq!(cache.resident_way(0x000), Some(0));
    assert_eq!(cache.resident_way(0x080), Some(1));
}

#[test]
fn least_recently_used_way_is_evicted() {
    let (mut cache, _log) = level(2);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x000, &mut word, &mut clock);
    cache.read(0x080, &mut word, &mut clock);
    cache.read(0x000, &mut word, &mut clock);
    cache.read(0x100, &mut word, &mut clock);

    assert_eq!(cache.resident_way(0x000), Some(0));
    assert_eq!(cache.resident_way(0x080), None);
    assert_eq!(cache.resident_way(0x100), Some(1));
}

/// Always evicts the highest way.
#[derive(Debug)]
struct LastWay;

impl ReplacementPolicy for LastWay {
    fn update(&mut self, _set: usize, _way: usize, _now: u32) {}

    fn get_victim(&mut self, _set: usize) -> usize {
        1
    }

    fn reset(&mut self) {}
}

#[test]
fn policy_can_be_substituted() {
    let (cache, _log) = level(2);
    let mut cache = cache.with_policy(Box::new(LastWay));
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    // Under LRU this sequence would evict 0x000.
    cache.read(0x000, &mut word, &mut clock);
    cache.read(0x080, &mut word, &mut clock);
    cache.read(0x080, &mut word, &mut clock);
    cache.read(0x100, &mut word, &mut clock);

    assert_eq!(cache.resident_way(0x000), Some(0));
    assert_eq!(cache.resident_way(0x080), None);
    assert_eq!(cache.resident_way(0x100), Some(1));
}

type StampLog = Arc<Mutex<Vec<(usize, usize, u32)>>>;

/// Records every stamp the level hands to its policy.
#[derive(Debug)]
struct StampRecorder(StampLog);

impl ReplacementPolicy for StampRecorder {
    fn update(&mut self, set: usize, way: usize, now: u32) {
        self.0.lock().unwrap().push((set, way, now));
    }

    fn get_victim(&mut self, _set: usize) -> usize {
        0
    }

    fn reset(&mut self) {}
}

/// Fills are stamped after the lower level's cost, hits before this level's own.
#[test]
fn policy_stamped_before_own_latency() {
    let stamps = StampLog::default();
    let (cache, _log) = level(2);
    let mut cache = cache.with_policy(Box::new(StampRecorder(Arc::clone(&stamps))));
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];

    cache.read(0x040, &mut word, &mut clock); // miss: 10 below, then 1
    cache.read(0x040, &mut word, &mut clock); // read hit: 1
    cache.write(0x040, &[1, 2, 3, 4], &mut clock); // write hit: 2

    assert_eq!(
        *stamps.lock().unwrap(),
        vec![(1, 0, NEXT_LATENCY), (1, 0, NEXT_LATENCY + 1), (1, 0, NEXT_LATENCY + 2)]
    );
    assert_eq!(clock.now(), NEXT_LATENCY + 4);
}

// ══════════════════════════════════════════════════════════
// 4. Misuse and reset
// ══════════════════════════════════════════════════════════

#[test]
#[should_panic(expected = "crosses a block boundary")]
fn transfer_crossing_block_panics() {
    let (mut cache, _log) = level(1);
    let mut clock = TimeCounter::new();
    let mut word = [0u8; 4];
    cache.read(0x3E, &mut word, &mut clock);
}

#[test]
fn clear_invalidates_lines_and_lower_level() {
    let (mut cache, log) = level(1);
    let mut clock = TimeCounter::new();
    cache.write(0x10, &[1, 1, 1, 1], &mut clock);

    cache.clear();

    assert_eq!(cache.line_state(0x10), LineState::Invalid);
    assert_eq!(cache.stats().accesses(), 0);
    assert!(log.lock().unwrap().is_empty());
}
