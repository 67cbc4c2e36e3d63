//! Disk Facade.
//!
//! `Disk` is the surface index structures program against. It wraps one
//! memory controller and keeps its own traffic ledger, decoupled from (but
//! kept consistent with) the controller's internal time counters. Every
//! read/write/overwrite pegs `(time, +1 operation, +bytes)`; the deferred
//! cost of queued writes surfaces exactly once, at flush time, via
//! delta-pegging of the controller's write/overwrite time counters.

use crate::controller::{counter as ctrl, MemoryController};
use crate::counters::{CounterManager, CountersSnapshot};
use crate::model::MemoryModel;
use serde::Serialize;
use std::fmt;

/// Disk ledger counter ids.
pub mod counter {
    use crate::counters::CounterId;

    /// Total simulated seconds spent reading.
    pub const READ_TOTAL_TIME: CounterId = 0;
    /// Number of read operations issued.
    pub const READ_TOTAL_OPERATIONS: CounterId = 1;
    /// Logical bytes requested by reads.
    pub const READ_TOTAL_BYTES: CounterId = 2;

    /// Total simulated seconds spent writing (realized at flush).
    pub const WRITE_TOTAL_TIME: CounterId = 3;
    /// Number of write operations issued.
    pub const WRITE_TOTAL_OPERATIONS: CounterId = 4;
    /// Logical bytes requested by writes.
    pub const WRITE_TOTAL_BYTES: CounterId = 5;

    /// Total simulated seconds spent overwriting (realized at flush).
    pub const OVERWRITE_TOTAL_TIME: CounterId = 6;
    /// Number of overwrite operations issued.
    pub const OVERWRITE_TOTAL_OPERATIONS: CounterId = 7;
    /// Logical bytes requested by overwrites.
    pub const OVERWRITE_TOTAL_BYTES: CounterId = 8;

    /// Read-only: average read time per operation.
    pub const READ_AVG_TIME: CounterId = 9;
    /// Read-only: average write time per operation.
    pub const WRITE_AVG_TIME: CounterId = 10;
    /// Read-only: average overwrite time per operation.
    pub const OVERWRITE_AVG_TIME: CounterId = 11;
}

/// Public timing facade over one memory controller.
#[derive(Debug, Clone)]
pub struct Disk {
    controller: MemoryController,
    counters: CounterManager,
}

impl Disk {
    /// Creates a disk over `model` with default cache-line sizes.
    pub fn new(model: Box<dyn MemoryModel>) -> Self {
        Self::with_controller(MemoryController::new(model))
    }

    /// Creates a disk over an explicitly configured controller.
    pub fn with_controller(controller: MemoryController) -> Self {
        let mut counters = CounterManager::new("disk");
        counters.add_counter(counter::READ_TOTAL_TIME, "READ_TOTAL_TIME");
        counters.add_counter(counter::READ_TOTAL_OPERATIONS, "READ_TOTAL_OPERATIONS");
        counters.add_counter(counter::READ_TOTAL_BYTES, "READ_TOTAL_BYTES");
        counters.add_counter(counter::WRITE_TOTAL_TIME, "WRITE_TOTAL_TIME");
        counters.add_counter(counter::WRITE_TOTAL_OPERATIONS, "WRITE_TOTAL_OPERATIONS");
        counters.add_counter(counter::WRITE_TOTAL_BYTES, "WRITE_TOTAL_BYTES");
        counters.add_counter(counter::OVERWRITE_TOTAL_TIME, "OVERWRITE_TOTAL_TIME");
        counters.add_counter(
            counter::OVERWRITE_TOTAL_OPERATIONS,
            "OVERWRITE_TOTAL_OPERATIONS",
        );
        counters.add_counter(counter::OVERWRITE_TOTAL_BYTES, "OVERWRITE_TOTAL_BYTES");
        counters.add_ratio_counter(
            counter::READ_AVG_TIME,
            "READ_AVG_TIME",
            counter::READ_TOTAL_TIME,
            counter::READ_TOTAL_OPERATIONS,
        );
        counters.add_ratio_counter(
            counter::WRITE_AVG_TIME,
            "WRITE_AVG_TIME",
            counter::WRITE_TOTAL_TIME,
            counter::WRITE_TOTAL_OPERATIONS,
        );
        counters.add_ratio_counter(
            counter::OVERWRITE_AVG_TIME,
            "OVERWRITE_AVG_TIME",
            counter::OVERWRITE_TOTAL_TIME,
            counter::OVERWRITE_TOTAL_OPERATIONS,
        );

        Self {
            controller,
            counters,
        }
    }

    /// Reads a logical byte range.
    ///
    /// # Returns
    ///
    /// The simulated time; `0.0` when every touched cache line was warm.
    pub fn read_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        let time = self.controller.read_bytes(addr, bytes);
        self.counters.peg(counter::READ_TOTAL_TIME, time);
        self.counters.peg(counter::READ_TOTAL_OPERATIONS, 1.0);
        self.counters.peg(counter::READ_TOTAL_BYTES, bytes as f64);
        time
    }

    /// Queues a logical byte range for writing; cost is deferred to
    /// [`Self::flush_cache`].
    pub fn write_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        let time = self.controller.write_bytes(addr, bytes);
        self.counters.peg(counter::WRITE_TOTAL_TIME, time);
        self.counters.peg(counter::WRITE_TOTAL_OPERATIONS, 1.0);
        self.counters.peg(counter::WRITE_TOTAL_BYTES, bytes as f64);
        time
    }

    /// Queues a logical byte range for in-place overwriting; cost is
    /// deferred to [`Self::flush_cache`].
    pub fn overwrite_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        let time = self.controller.overwrite_bytes(addr, bytes);
        self.counters.peg(counter::OVERWRITE_TOTAL_TIME, time);
        self.counters.peg(counter::OVERWRITE_TOTAL_OPERATIONS, 1.0);
        self.counters
            .peg(counter::OVERWRITE_TOTAL_BYTES, bytes as f64);
        time
    }

    /// Realizes all deferred cost in the controller.
    ///
    /// The controller's write/overwrite time counters are snapshotted
    /// around the flush and their deltas pegged onto this ledger, so the
    /// deferred cost of every queued line shows up exactly once.
    pub fn flush_cache(&mut self) -> f64 {
        let write_before = self.controller.counter_value(ctrl::WRITE_TIME);
        let overwrite_before = self.controller.counter_value(ctrl::OVERWRITE_TIME);

        let time = self.controller.flush_cache();

        let write_delta = self.controller.counter_value(ctrl::WRITE_TIME) - write_before;
        let overwrite_delta =
            self.controller.counter_value(ctrl::OVERWRITE_TIME) - overwrite_before;
        self.counters.peg(counter::WRITE_TOTAL_TIME, write_delta);
        self.counters
            .peg(counter::OVERWRITE_TOTAL_TIME, overwrite_delta);
        time
    }

    /// Returns the controller's logical-address high-water mark.
    pub fn current_memory_addr(&self) -> u64 {
        self.controller.current_memory_addr()
    }

    /// Returns the `(name, value)` pair of a disk counter.
    pub fn counter(&self, id: crate::counters::CounterId) -> (String, f64) {
        self.counters.get(id)
    }

    /// Returns the value of a disk counter.
    pub fn counter_value(&self, id: crate::counters::CounterId) -> f64 {
        self.counters.value(id)
    }

    /// Zeroes one disk counter; ratio counters are unaffected.
    pub fn reset_counter(&mut self, id: crate::counters::CounterId) {
        self.counters.reset_counter(id);
    }

    /// Zeroes every stored disk counter.
    pub fn reset_all_counters(&mut self) {
        self.counters.reset_all_counters();
    }

    /// Returns the underlying controller.
    pub fn controller(&self) -> &MemoryController {
        &self.controller
    }

    /// Returns the underlying device model.
    pub fn model(&self) -> &dyn MemoryModel {
        self.controller.model()
    }

    /// Produces a serializable snapshot of the whole device stack.
    pub fn snapshot(&self) -> DiskSnapshot {
        DiskSnapshot {
            model: self.model().name().to_string(),
            page_size: self.model().page_size(),
            block_size: self.model().block_size(),
            wear_out: self.model().wear_out(),
            current_memory_addr: self.current_memory_addr(),
            disk_counters: self.counters.snapshot(),
            controller_counters: self.controller.counters().snapshot(),
        }
    }

    /// Renders the full snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // Serialization of the snapshot cannot fail: it is plain data.
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }
}

impl fmt::Display for Disk {
    /// Short one-line summary: device, wear, pending work.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (wear {} B, {} pending lines, cursor {:#x})",
            self.model().name(),
            self.model().wear_out(),
            self.controller.pending_lines(),
            self.current_memory_addr()
        )
    }
}

/// Serializable snapshot of a disk and its controller.
#[derive(Debug, Clone, Serialize)]
pub struct DiskSnapshot {
    pub model: String,
    pub page_size: u64,
    pub block_size: u64,
    pub wear_out: u64,
    pub current_memory_addr: u64,
    pub disk_counters: CountersSnapshot,
    pub controller_counters: CountersSnapshot,
}
