//! Flash NAND Cost Models.
//!
//! Two views of the same chip geometry:
//!
//! * [`FlashNandFtl`] models a chip behind a flash translation layer. Like
//!   the SSD model it defers erases until a full block's worth of garbage
//!   has accumulated, but it has a single flat read/write timing pair with
//!   no random/sequential distinction.
//! * [`FlashNandRaw`] models the bare chip without any indirection layer:
//!   an overwrite must erase its blocks immediately and rewrite them whole.

use super::MemoryModel;

/// Timing constants for one Flash NAND chip, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashTimings {
    /// Per-page read time.
    pub read: f64,
    /// Per-page program time.
    pub write: f64,
    /// Per-block erase time.
    pub block_erase: f64,
}

/// FTL-managed Flash NAND cost model with deferred erase.
#[derive(Debug, Clone)]
pub struct FlashNandFtl {
    name: String,
    page_size: u64,
    pages_per_block: u64,
    timings: FlashTimings,
    /// Overwritten pages awaiting reclamation.
    dirty_pages: u64,
    touched_bytes: u64,
}

impl FlashNandFtl {
    /// Creates an FTL-managed model from chip geometry and timings.
    pub fn new(
        name: impl Into<String>,
        page_size: u64,
        pages_per_block: u64,
        timings: FlashTimings,
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
    pub fn timings(&self) -> FlashTimings {
        self.timings
    }

    /// Returns the number of overwritten pages awaiting reclamation.
    pub fn dirty_pages(&self) -> u64 {
        self.dirty_pages
    }
}

impl MemoryModel for FlashNandFtl {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }

    fn block_size(&self) -> u64 {
        self.page_size * self.pages_per_block
    }

    fn read_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        bytes.div_ceil(self.page_size) as f64 * self.timings.read
    }

    fn write_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let pages = bytes.div_ceil(self.page_size);
        self.touched_bytes += pages * self.page_size;
        pages as f64 * self.timings.write
    }

    /// Pad read for a partial last page, rewrite, then reclaim every full
    /// block of accumulated garbage.
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

/// Raw Flash NAND cost model with immediate erase-before-write.
#[derive(Debug, Clone)]
pub struct FlashNandRaw {
    name: String,
    page_size: u64,
    pages_per_block: u64,
    timings: FlashTimings,
    touched_bytes: u64,
}

impl FlashNandRaw {
    /// Creates a raw-chip model from chip geometry and timings.
    pub fn new(
        name: impl Into<String>,
        page_size: u64,
        pages_per_block: u64,
        timings: FlashTimings,
    ) -> Self {
        Self {
            name: name.into(),
            page_size,
            pages_per_block,
            timings,
            touched_bytes: 0,
        }
    }

    /// Returns the timing constants.
    pub fn timings(&self) -> FlashTimings {
        self.timings
    }
}

impl MemoryModel for FlashNandRaw {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }

    fn block_size(&self) -> u64 {
        self.page_size * self.pages_per_block
    }

    fn read_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        bytes.div_ceil(self.page_size) as f64 * self.timings.read
    }

    fn write_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let pages = bytes.div_ceil(self.page_size);
        self.touched_bytes += pages * self.page_size;
        pages as f64 * self.timings.write
    }

    /// Erase-before-write without indirection.
    ///
    /// Reads the pad needed to complete the last block, erases every block
    /// the range touches, then rewrites those blocks in full.
    fn overwrite_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let block_size = self.block_size();
        let mut time = 0.0;
        let tail = bytes % block_size;
        if tail != 0 {
            time += self.read_bytes(block_size - tail);
        }
        let blocks = bytes.div_ceil(block_size);
        time += blocks as f64 * self.timings.block_erase;
        time += self.write_bytes(blocks * block_size);
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
