//! Integration tests for the memory controller cache layer.

use memcost::controller::{counter, MemoryController};
use memcost::model::presets;
use memcost::model::MemoryModel;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

/// Creates a controller over the Samsung840 SSD with default line sizes.
fn samsung_controller() -> MemoryController {
    MemoryController::new(Box::new(presets::ssd_samsung_840()))
}

/// Tests that a cold read charges one line read and a warm read is free.
#[test]
fn test_read_miss_then_hit() {
    let mut ctrl = samsung_controller();
    let t = presets::ssd_samsung_840().timings();

    let miss = ctrl.read_bytes(0, 100);
    assert!(close(miss, t.read_random));

    let hit = ctrl.read_bytes(0, 100);
    assert_eq!(hit, 0.0);
}

/// Tests that a read spanning several lines charges each cold line once.
#[test]
fn test_read_spanning_lines() {
    let mut ctrl = samsung_controller();
    let line = ctrl.read_line_bytes();
    let t = presets::ssd_samsung_840().timings();

    let time = ctrl.read_bytes(0, 3 * line);
    assert!(close(time, 3.0 * t.read_random));

    // The middle line is warm now.
    let again = ctrl.read_bytes(line, line);
    assert_eq!(again, 0.0);
}

/// Tests that writes always defer: two writes to the same address both
/// return zero, and the flush charges exactly one line write.
#[test]
fn test_write_dedup_single_charge() {
    let mut ctrl = samsung_controller();
    let line = ctrl.write_line_bytes();
    let t = presets::ssd_samsung_840().timings();

    assert_eq!(ctrl.write_bytes(0, 10), 0.0);
    assert_eq!(ctrl.write_bytes(0, 20), 0.0);
    assert_eq!(ctrl.pending_lines(), 1);

    let flushed = ctrl.flush_cache();
    let expected = {
        // One plain line write on a fresh model.
        let mut model = presets::ssd_samsung_840();
        model.write_bytes(line)
    };
    assert!(close(flushed, expected));
    assert!(close(flushed, t.write_random));
}

/// Tests that writes to distinct lines are each charged at flush.
#[test]
fn test_write_distinct_lines() {
    let mut ctrl = samsung_controller();
    let t = presets::ssd_samsung_840().timings();

    ctrl.write_bytes(0, 10);
    ctrl.write_bytes(10_000, 10);
    assert_eq!(ctrl.pending_lines(), 2);

    let flushed = ctrl.flush_cache();
    assert!(close(flushed, 2.0 * t.write_random));
}

/// Tests that a flush commits state: caches empty, second flush free.
#[test]
fn test_flush_clears_pending() {
    let mut ctrl = samsung_controller();
    ctrl.write_bytes(0, 10);
    ctrl.overwrite_bytes(20_000, 10);

    assert!(ctrl.flush_cache() > 0.0);
    assert_eq!(ctrl.pending_lines(), 0);
    assert_eq!(ctrl.flush_cache(), 0.0);
}

/// Tests that a flush invalidates read warmth.
#[test]
fn test_flush_invalidates_read_cache() {
    let mut ctrl = samsung_controller();

    let cold = ctrl.read_bytes(0, 100);
    assert!(cold > 0.0);
    assert_eq!(ctrl.read_bytes(0, 100), 0.0);

    ctrl.flush_cache();

    let cold_again = ctrl.read_bytes(0, 100);
    assert!(close(cold_again, cold));
}

/// Tests that a fully covered overwrite line flushes through the plain
/// write path, without any read penalty.
#[test]
fn test_overwrite_full_line_flushes_as_write() {
    let mut ctrl = samsung_controller();
    let line = ctrl.write_line_bytes();
    let t = presets::ssd_samsung_840().timings();

    assert_eq!(ctrl.overwrite_bytes(0, line), 0.0);
    let flushed = ctrl.flush_cache();
    assert!(close(flushed, t.write_random));
}

/// Tests that a partially covered overwrite line flushes through the
/// read-modify-write path with its dirty byte count.
#[test]
fn test_overwrite_partial_line_flush_cost() {
    let mut ctrl = samsung_controller();

    assert_eq!(ctrl.overwrite_bytes(0, 100), 0.0);
    let flushed = ctrl.flush_cache();

    let expected = {
        let mut model = presets::ssd_samsung_840();
        model.overwrite_bytes(100)
    };
    assert!(close(flushed, expected));
}

/// Tests that overlapping partial overwrites merge their dirty bitmaps;
/// full coverage upgrades the line to a plain write.
#[test]
fn test_overwrite_bitmap_merge_to_full() {
    let mut ctrl = MemoryController::new(Box::new(presets::pcm_default()));
    let line = ctrl.write_line_bytes();
    assert_eq!(line, 64);

    ctrl.overwrite_bytes(0, 32);
    ctrl.overwrite_bytes(16, 48);
    assert_eq!(ctrl.pending_lines(), 1);

    // Fully covered: one plain line write, no pad read.
    let flushed = ctrl.flush_cache();
    let expected = {
        let mut model = presets::pcm_default();
        model.write_bytes(line)
    };
    assert!(close(flushed, expected));
}

/// Tests that a line queued both as write and overwrite flushes once, as a
/// plain write.
#[test]
fn test_write_and_overwrite_same_line_flush_once() {
    let mut ctrl = samsung_controller();
    let t = presets::ssd_samsung_840().timings();

    ctrl.write_bytes(0, 10);
    ctrl.overwrite_bytes(100, 20);
    assert_eq!(ctrl.pending_lines(), 1);

    let flushed = ctrl.flush_cache();
    assert!(close(flushed, t.write_random));
}

/// Tests that zero-byte operations are no-ops at the controller level.
#[test]
fn test_zero_bytes_noop() {
    let mut ctrl = samsung_controller();

    assert_eq!(ctrl.read_bytes(0, 0), 0.0);
    assert_eq!(ctrl.write_bytes(0, 0), 0.0);
    assert_eq!(ctrl.overwrite_bytes(0, 0), 0.0);
    assert_eq!(ctrl.pending_lines(), 0);
    assert_eq!(ctrl.current_memory_addr(), 0);
}

/// Tests that the logical-address cursor is a monotonic high-water mark.
#[test]
fn test_memory_cursor_monotonic() {
    let mut ctrl = samsung_controller();
    assert_eq!(ctrl.current_memory_addr(), 0);

    ctrl.write_bytes(100, 50);
    assert_eq!(ctrl.current_memory_addr(), 150);

    ctrl.overwrite_bytes(10, 20);
    assert_eq!(ctrl.current_memory_addr(), 150);

    ctrl.write_bytes(200, 100);
    assert_eq!(ctrl.current_memory_addr(), 300);
}

/// Tests that the internal write-time counter moves only at flush.
#[test]
fn test_internal_counters_peg_at_flush() {
    let mut ctrl = samsung_controller();

    ctrl.write_bytes(0, 10);
    assert_eq!(ctrl.counter_value(counter::WRITE_TIME), 0.0);

    let flushed = ctrl.flush_cache();
    assert!(close(ctrl.counter_value(counter::WRITE_TIME), flushed));
    assert_eq!(ctrl.counter_value(counter::OVERWRITE_TIME), 0.0);
}

/// Tests independent read/write cache-line sizes.
#[test]
fn test_independent_line_sizes() {
    let ctrl = MemoryController::with_line_sizes(
        Box::new(presets::ssd_samsung_840()),
        2048,
        4096,
    );
    assert_eq!(ctrl.read_line_bytes(), 2048);
    assert_eq!(ctrl.write_line_bytes(), 4096);
}

/// Tests that a zero line size falls back to the model page size.
#[test]
fn test_zero_line_size_fallback() {
    let ctrl =
        MemoryController::with_line_sizes(Box::new(presets::ssd_samsung_840()), 0, 0);
    assert_eq!(ctrl.read_line_bytes(), 8192);
    assert_eq!(ctrl.write_line_bytes(), 8192);
}

/// Tests that cloning a controller mid-state yields an independent replica
/// whose flush matches the original's.
#[test]
fn test_clone_round_trip() {
    let mut ctrl = samsung_controller();
    ctrl.read_bytes(0, 100);
    ctrl.write_bytes(0, 10);
    ctrl.overwrite_bytes(30_000, 500);

    let mut replica = ctrl.clone();

    let a = ctrl.flush_cache();
    let b = replica.flush_cache();
    assert!(close(a, b));
    assert_eq!(ctrl.model().wear_out(), replica.model().wear_out());

    // Divergence after the clone stays local.
    ctrl.write_bytes(0, 10);
    ctrl.flush_cache();
    assert!(ctrl.model().wear_out() > replica.model().wear_out());
}
