//! Memory Controller.
//!
//! The controller sits between the disk facade and a device cost model and
//! translates logical byte-range operations into deferred physical cost.
//! It tracks three cache containers, each keyed by cache-line index
//! (`addr / line_size`):
//!
//! * `read_cache` - lines that are warm; repeated reads of a warm line are
//!   free.
//! * `write_cache` - lines with a pending full write; the physical cost is
//!   charged once per distinct line, at flush time.
//! * `overwrite_cache` - lines with pending partial modifications, each
//!   carrying a per-byte dirty bitmap so the flush can distinguish a fully
//!   covered line (plain write) from a partially covered one (read-modify-
//!   write).
//!
//! Read and write cache-line sizes are independently configurable; a line
//! index appears at most once per container.

use crate::counters::CounterManager;
use crate::model::MemoryModel;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use tracing::warn;

/// Controller-internal counter ids.
///
/// The disk facade snapshots the write/overwrite time counters around
/// `flush_cache` to surface deferred cost exactly once in its own ledger.
pub mod counter {
    use crate::counters::CounterId;

    /// Total simulated seconds spent in physical reads.
    pub const READ_TIME: CounterId = 0;
    /// Total simulated seconds spent in physical full-line writes.
    pub const WRITE_TIME: CounterId = 1;
    /// Total simulated seconds spent in physical partial overwrites.
    pub const OVERWRITE_TIME: CounterId = 2;
}

/// Write-back cache layer over one device cost model.
#[derive(Debug, Clone)]
pub struct MemoryController {
    model: Box<dyn MemoryModel>,
    read_line_bytes: u64,
    write_line_bytes: u64,
    /// Warm cache-line indices.
    read_cache: BTreeSet<u64>,
    /// Pending full-write line indices.
    write_cache: BTreeSet<u64>,
    /// Pending partial-overwrite lines with per-byte dirty bitmaps.
    overwrite_cache: BTreeMap<u64, Vec<bool>>,
    /// Logical-address high-water mark.
    current_addr: u64,
    counters: CounterManager,
}

impl MemoryController {
    /// Creates a controller whose read and write cache lines both default
    /// to the model's page size.
    pub fn new(model: Box<dyn MemoryModel>) -> Self {
        let line = model.page_size().max(1);
        Self::with_line_sizes(model, line, line)
    }

    /// Creates a controller with explicit cache-line sizes.
    ///
    /// A zero line size is meaningless; it is logged and replaced by the
    /// model's page size (or 1 for geometry-less models).
    pub fn with_line_sizes(
        model: Box<dyn MemoryModel>,
        read_line_bytes: u64,
        write_line_bytes: u64,
    ) -> Self {
        let fallback = model.page_size().max(1);
        let read_line_bytes = if read_line_bytes == 0 {
            warn!(model = %model.name(), "zero read cache-line size, using page size");
            fallback
        } else {
            read_line_bytes
        };
        let write_line_bytes = if write_line_bytes == 0 {
            warn!(model = %model.name(), "zero write cache-line size, using page size");
            fallback
        } else {
            write_line_bytes
        };

        let mut counters = CounterManager::new("memory controller");
        counters.add_counter(counter::READ_TIME, "READ_TIME");
        counters.add_counter(counter::WRITE_TIME, "WRITE_TIME");
        counters.add_counter(counter::OVERWRITE_TIME, "OVERWRITE_TIME");

        Self {
            model,
            read_line_bytes,
            write_line_bytes,
            read_cache: BTreeSet::new(),
            write_cache: BTreeSet::new(),
            overwrite_cache: BTreeMap::new(),
            current_addr: 0,
            counters,
        }
    }

    /// Reads a logical byte range.
    ///
    /// Each touched line that is already warm costs nothing; each cold line
    /// is charged one physical line read and becomes warm.
    ///
    /// # Returns
    ///
    /// The simulated time, `0.0` when every touched line was warm.
    pub fn read_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let mut time = 0.0;
        for line in line_span(addr, bytes, self.read_line_bytes) {
            if self.read_cache.insert(line) {
                time += self.model.read_bytes(self.read_line_bytes);
            }
        }
        self.counters.peg(counter::READ_TIME, time);
        time
    }

    /// Queues a logical byte range for writing.
    ///
    /// Touched line indices are deduplicated in the write cache; the
    /// physical cost is always deferred to [`Self::flush_cache`], so this
    /// returns `0.0` unconditionally.
    pub fn write_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        for line in line_span(addr, bytes, self.write_line_bytes) {
            self.write_cache.insert(line);
        }
        self.advance_cursor(addr + bytes);
        0.0
    }

    /// Queues a logical byte range for in-place overwriting.
    ///
    /// Like [`Self::write_bytes`] this defers all cost, but it additionally
    /// records which bytes of each touched line were modified. Overlapping
    /// overwrites merge their dirty bitmaps.
    pub fn overwrite_bytes(&mut self, addr: u64, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let line_size = self.write_line_bytes;
        let end = addr + bytes;
        for line in line_span(addr, bytes, line_size) {
            let line_start = line * line_size;
            let from = addr.max(line_start) - line_start;
            let to = end.min(line_start + line_size) - line_start;
            let bitmap = self
                .overwrite_cache
                .entry(line)
                .or_insert_with(|| vec![false; line_size as usize]);
            for flag in &mut bitmap[from as usize..to as usize] {
                *flag = true;
            }
        }
        self.advance_cursor(end);
        0.0
    }

    /// Realizes all deferred write and overwrite cost.
    ///
    /// Every distinct pending line is charged exactly once: full-write
    /// lines (and fully dirty overwrite lines) through
    /// `MemoryModel::write_bytes` for one line's worth of bytes, partially
    /// dirty lines through `MemoryModel::overwrite_bytes` for their dirty
    /// byte count. A line queued both ways flushes once, as a plain write.
    ///
    /// Flushing commits state: all three caches are cleared, including the
    /// read cache, since prior read-warmth assumptions no longer hold.
    ///
    /// # Returns
    ///
    /// The aggregate simulated time of the flush.
    pub fn flush_cache(&mut self) -> f64 {
        let mut write_time = 0.0;
        let mut overwrite_time = 0.0;

        for _line in &self.write_cache {
            write_time += self.model.write_bytes(self.write_line_bytes);
        }
        for (line, bitmap) in &self.overwrite_cache {
            if self.write_cache.contains(line) {
                continue;
            }
            let dirty = bitmap.iter().filter(|&&flag| flag).count() as u64;
            if dirty == self.write_line_bytes {
                write_time += self.model.write_bytes(self.write_line_bytes);
            } else {
                overwrite_time += self.model.overwrite_bytes(dirty);
            }
        }

        self.write_cache.clear();
        self.overwrite_cache.clear();
        self.read_cache.clear();

        self.counters.peg(counter::WRITE_TIME, write_time);
        self.counters.peg(counter::OVERWRITE_TIME, overwrite_time);
        write_time + overwrite_time
    }

    /// Returns the monotonically non-decreasing logical-address cursor.
    ///
    /// The cursor is the high-water mark of every queued write/overwrite
    /// range; address allocation policy belongs to the index layer.
    pub fn current_memory_addr(&self) -> u64 {
        self.current_addr
    }

    fn advance_cursor(&mut self, end: u64) {
        self.current_addr = self.current_addr.max(end);
    }

    /// Returns the read cache-line size in bytes.
    pub fn read_line_bytes(&self) -> u64 {
        self.read_line_bytes
    }

    /// Returns the write cache-line size in bytes.
    pub fn write_line_bytes(&self) -> u64 {
        self.write_line_bytes
    }

    /// Returns the number of pending lines awaiting flush.
    pub fn pending_lines(&self) -> usize {
        let overlapping = self
            .overwrite_cache
            .keys()
            .filter(|&line| self.write_cache.contains(line))
            .count();
        self.write_cache.len() + self.overwrite_cache.len() - overlapping
    }

    /// Returns the value of a controller-internal counter.
    pub fn counter_value(&self, id: crate::counters::CounterId) -> f64 {
        self.counters.value(id)
    }

    /// Returns the controller's internal counters.
    pub fn counters(&self) -> &CounterManager {
        &self.counters
    }

    /// Returns the owned device model.
    pub fn model(&self) -> &dyn MemoryModel {
        self.model.as_ref()
    }

    /// Returns the owned device model mutably.
    pub fn model_mut(&mut self) -> &mut dyn MemoryModel {
        self.model.as_mut()
    }
}

/// Inclusive range of cache-line indices touched by `[addr, addr+bytes)`.
fn line_span(addr: u64, bytes: u64, line_size: u64) -> RangeInclusive<u64> {
    let first = addr / line_size;
    let last = (addr + bytes - 1) / line_size;
    first..=last
}
