//! SSD Cost Model.
//!
//! Models a log-structured SSD with distinct random and sequential timing
//! tiers and eager block reclamation: overwrites accumulate dirty pages,
//! and once a full block's worth of garbage has piled up the model charges
//! an erase for each reclaimable block.

use super::MemoryModel;

/// Operations touching fewer pages than this use the random timing tier.
pub const RANDOM_OP_THRESHOLD: u64 = 4;

/// Timing constants for one SSD device, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsdTimings {
    /// Per-page read time for small (random) operations.
    pub read_random: f64,
    /// Per-page write time for small (random) operations.
    pub write_random: f64,
    /// Per-page read time for large (sequential) operations.
    pub read_seq: f64,
    /// Per-page write time for large (sequential) operations.
    pub write_seq: f64,
    /// Time to erase one whole block.
    pub block_erase: f64,
}

/// Tiered random/sequential SSD cost model.
#[derive(Debug, Clone)]
pub struct SsdModel {
    name: String,
    page_size: u64,
    pages_per_block: u64,
    timings: SsdTimings,
    /// Overwritten pages awaiting reclamation.
    dirty_pages: u64,
    /// Cumulative bytes physically programmed.
    touched_bytes: u64,
}

impl SsdModel {
    /// Creates an SSD model from its geometry and timing constants.
    ///
    /// # Arguments
    ///
    /// * `name` - Device model name used in reports.
    /// * `page_size` - Page size in bytes (must be non-zero).
    /// * `pages_per_block` - Number of pages per erase block.
    /// * `timings` - Per-device timing constants.
    pub fn new(
        name: impl Into<String>,
        page_size: u64,
        pages_per_block: u64,
        timings: SsdTimings,
    ) -> Self {
        Self {
            name: name.into(),
            page_size,
            pages_per_block,
            timings,
            dirty_pages: 0,
            touched_bytes: 0,
        }
    }

    /// Returns the timing constants.
    pub fn timings(&self) -> SsdTimings {
        self.timings
    }

    /// Returns the number of overwritten pages awaiting reclamation.
    pub fn dirty_pages(&self) -> u64 {
        self.dirty_pages
    }
}

impl MemoryModel for SsdModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }

    fn block_size(&self) -> u64 {
        self.page_size * self.pages_per_block
    }

    /// Per-page read cost, tier selected by the operation's page count.
    fn read_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let pages = bytes.div_ceil(self.page_size);
        let per_page = if pages < RANDOM_OP_THRESHOLD {
            self.timings.read_random
        } else {
            self.timings.read_seq
        };
        pages as f64 * per_page
    }

    /// Per-page write cost; wear advances by whole programmed pages.
    fn write_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let pages = bytes.div_ceil(self.page_size);
        let per_page = if pages < RANDOM_OP_THRESHOLD {
            self.timings.write_random
        } else {
            self.timings.write_seq
        };
        self.touched_bytes += pages * self.page_size;
        pages as f64 * per_page
    }

    /// Read-modify-write with deferred erase.
    ///
    /// A partial last page is first completed with a pad read, then the
    /// whole range is rewritten. The overwritten pages join the dirty pool;
    /// every full block's worth of dirty pages triggers one block erase.
    fn overwrite_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let mut time = 0.0;
        let tail = bytes % self.page_size;
        if tail != 0 {
            time += self.read_bytes(self.page_size - tail);
        }
        time += self.write_bytes(bytes);

        self.dirty_pages += bytes.div_ceil(self.page_size);
        let blocks = self.dirty_pages / self.pages_per_block;
        if blocks > 0 {
            self.dirty_pages -= blocks * self.pages_per_block;
            time += blocks as f64 * self.timings.block_erase;
        }
        time
    }

    fn wear_out(&self) -> u64 {
        self.touched_bytes
    }

    fn reset_state(&mut self) {
        self.touched_bytes = 0;
    }

    fn clone_model(&self) -> Box<dyn MemoryModel> {
        Box::new(self.clone())
    }
}
