//! Integration tests for the disk facade and its traffic ledger.

use memcost::controller::counter as ctrl_counter;
use memcost::disk::counter;
use memcost::model::presets;
use memcost::Disk;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

fn samsung_disk() -> Disk {
    Disk::new(Box::new(presets::ssd_samsung_840()))
}

/// Tests the documented Samsung840 scenario: two reads on distinct cache
/// lines each cost one random page read, and the ledger records both.
#[test]
fn test_samsung_840_double_read_scenario() {
    let mut disk = samsung_disk();

    let first = disk.read_bytes(0, 100);
    let second = disk.read_bytes(10_000, 100);
    assert!(close(first, 21e-6));
    assert!(close(second, 21e-6));

    assert!(close(disk.counter_value(counter::READ_TOTAL_TIME), 42e-6));
    assert_eq!(disk.counter_value(counter::READ_TOTAL_OPERATIONS), 2.0);
    assert_eq!(disk.counter_value(counter::READ_TOTAL_BYTES), 200.0);
}

/// Tests that a warm read still counts as an operation with zero time.
#[test]
fn test_warm_read_pegs_operation() {
    let mut disk = samsung_disk();
    disk.read_bytes(0, 100);

    assert_eq!(disk.read_bytes(0, 100), 0.0);
    assert_eq!(disk.counter_value(counter::READ_TOTAL_OPERATIONS), 2.0);
    assert!(close(disk.counter_value(counter::READ_TOTAL_TIME), 21e-6));
}

/// Tests the documented PCM scenario at the disk level.
#[test]
fn test_pcm_read_scenario() {
    let mut disk = Disk::new(Box::new(presets::pcm_default()));
    let time = disk.read_bytes(0, 10);
    assert!(close(time, 50e-9));
}

/// Tests that writes peg operations and bytes immediately but time only at
/// flush.
#[test]
fn test_write_defers_time_to_flush() {
    let mut disk = samsung_disk();

    assert_eq!(disk.write_bytes(0, 100), 0.0);
    assert_eq!(disk.counter_value(counter::WRITE_TOTAL_TIME), 0.0);
    assert_eq!(disk.counter_value(counter::WRITE_TOTAL_OPERATIONS), 1.0);
    assert_eq!(disk.counter_value(counter::WRITE_TOTAL_BYTES), 100.0);

    let flushed = disk.flush_cache();
    assert!(flushed > 0.0);
    assert!(close(disk.counter_value(counter::WRITE_TOTAL_TIME), flushed));
    assert_eq!(disk.counter_value(counter::OVERWRITE_TOTAL_TIME), 0.0);
}

/// Tests that the flush pegs exactly the controller's write/overwrite time
/// delta, for a mixed batch of queued lines.
#[test]
fn test_flush_delta_pegging() {
    let mut disk = samsung_disk();

    disk.write_bytes(0, 100);
    disk.overwrite_bytes(30_000, 500);
    disk.overwrite_bytes(60_000, 8192);

    let flushed = disk.flush_cache();

    let ctrl_write = disk.controller().counter_value(ctrl_counter::WRITE_TIME);
    let ctrl_overwrite = disk
        .controller()
        .counter_value(ctrl_counter::OVERWRITE_TIME);

    assert!(close(
        disk.counter_value(counter::WRITE_TOTAL_TIME),
        ctrl_write
    ));
    assert!(close(
        disk.counter_value(counter::OVERWRITE_TOTAL_TIME),
        ctrl_overwrite
    ));
    assert!(close(flushed, ctrl_write + ctrl_overwrite));
}

/// Tests that deferred cost surfaces exactly once: a second flush with an
/// empty cache pegs nothing.
#[test]
fn test_flush_pegs_once() {
    let mut disk = samsung_disk();
    disk.write_bytes(0, 100);
    disk.flush_cache();

    let after_first = disk.counter_value(counter::WRITE_TOTAL_TIME);
    assert_eq!(disk.flush_cache(), 0.0);
    assert!(close(
        disk.counter_value(counter::WRITE_TOTAL_TIME),
        after_first
    ));
}

/// Tests the derived average counters and their division-by-zero guard.
#[test]
fn test_average_counters() {
    let mut disk = samsung_disk();

    // No operations yet: averages read as zero.
    assert_eq!(disk.counter_value(counter::READ_AVG_TIME), 0.0);

    disk.read_bytes(0, 100);
    disk.read_bytes(10_000, 100);
    disk.read_bytes(0, 100);

    let expected = disk.counter_value(counter::READ_TOTAL_TIME) / 3.0;
    assert!(close(disk.counter_value(counter::READ_AVG_TIME), expected));
}

/// Tests that pegging or resetting a derived counter is a silent no-op.
#[test]
fn test_average_counter_is_read_only() {
    let mut disk = samsung_disk();
    disk.read_bytes(0, 100);

    let before = disk.counter_value(counter::READ_AVG_TIME);
    disk.reset_counter(counter::READ_AVG_TIME);
    assert!(close(disk.counter_value(counter::READ_AVG_TIME), before));
}

/// Tests single and global counter resets.
#[test]
fn test_counter_resets() {
    let mut disk = samsung_disk();
    disk.read_bytes(0, 100);
    disk.write_bytes(0, 100);

    disk.reset_counter(counter::READ_TOTAL_TIME);
    assert_eq!(disk.counter_value(counter::READ_TOTAL_TIME), 0.0);
    assert_eq!(disk.counter_value(counter::READ_TOTAL_OPERATIONS), 1.0);

    disk.reset_all_counters();
    assert_eq!(disk.counter_value(counter::READ_TOTAL_OPERATIONS), 0.0);
    assert_eq!(disk.counter_value(counter::WRITE_TOTAL_BYTES), 0.0);
}

/// Tests the neutral return for unknown counter ids.
#[test]
fn test_unknown_counter_id() {
    let disk = samsung_disk();
    let (name, value) = disk.counter(999);
    assert_eq!(name, "error");
    assert_eq!(value, 0.0);
}

/// Tests that a cloned disk replays an identical operation sequence to
/// identical counters and wear.
#[test]
fn test_clone_round_trip() {
    let mut disk = samsung_disk();
    disk.read_bytes(0, 100);
    disk.write_bytes(0, 2000);
    disk.overwrite_bytes(50_000, 300);

    let mut replica = disk.clone();

    for d in [&mut disk, &mut replica] {
        d.read_bytes(123_456, 64);
        d.write_bytes(9_000, 100);
        d.flush_cache();
        d.overwrite_bytes(70_000, 100);
        d.flush_cache();
    }

    for id in [
        counter::READ_TOTAL_TIME,
        counter::READ_TOTAL_OPERATIONS,
        counter::READ_TOTAL_BYTES,
        counter::WRITE_TOTAL_TIME,
        counter::WRITE_TOTAL_OPERATIONS,
        counter::WRITE_TOTAL_BYTES,
        counter::OVERWRITE_TOTAL_TIME,
        counter::OVERWRITE_TOTAL_OPERATIONS,
        counter::OVERWRITE_TOTAL_BYTES,
    ] {
        assert!(
            close(disk.counter_value(id), replica.counter_value(id)),
            "counter {} diverged",
            id
        );
    }
    assert_eq!(disk.model().wear_out(), replica.model().wear_out());
}

/// Tests the cursor passthrough and the structured snapshot.
#[test]
fn test_snapshot_and_cursor() {
    let mut disk = samsung_disk();
    disk.write_bytes(100, 50);
    assert_eq!(disk.current_memory_addr(), 150);

    let json = disk.to_json();
    assert!(json.contains("SSD Samsung840"));
    assert!(json.contains("READ_TOTAL_TIME"));

    let line = format!("{}", disk);
    assert!(line.contains("SSD Samsung840"));
}
