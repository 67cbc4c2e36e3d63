//! Phase-Change Memory Cost Model.
//!
//! PCM is byte-addressable: there is no erase block and no page rounding of
//! wear. Cost is charged per memory line touched, while the wear-out counter
//! advances by the exact number of bytes written. Overwrites are true
//! in-place updates, needing at most a pad read to complete the last line.

use super::MemoryModel;

/// Byte-addressable PCM cost model.
#[derive(Debug, Clone)]
pub struct PcmModel {
    name: String,
    /// Memory line width in bytes; reported as the model's page size.
    line_width: u64,
    /// Per-line read time in seconds.
    read_time: f64,
    /// Per-line write time in seconds.
    write_time: f64,
    touched_bytes: u64,
}

impl PcmModel {
    /// Creates a PCM model.
    ///
    /// # Arguments
    ///
    /// * `name` - Device model name used in reports.
    /// * `line_width` - Memory line width in bytes.
    /// * `read_time` - Time to read one line.
    /// * `write_time` - Time to write one line.
    pub fn new(name: impl Into<String>, line_width: u64, read_time: f64, write_time: f64) -> Self {
        Self {
            name: name.into(),
            line_width,
            read_time,
            write_time,
            touched_bytes: 0,
        }
    }

    /// Returns the per-line read time.
    pub fn read_time(&self) -> f64 {
        self.read_time
    }

    /// Returns the per-line write time.
    pub fn write_time(&self) -> f64 {
        self.write_time
    }
}

impl MemoryModel for PcmModel {
    fn name(&self) -> &str {
        &self.name
    }

    /// The line width doubles as the page size for byte-addressable PCM.
    fn page_size(&self) -> u64 {
        self.line_width
    }

    /// PCM has no erase block.
    fn block_size(&self) -> u64 {
        0
    }

    fn read_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        bytes.div_ceil(self.line_width) as f64 * self.read_time
    }

    /// Per-line write cost; wear advances by the exact byte count.
    fn write_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        self.touched_bytes += bytes;
        bytes.div_ceil(self.line_width) as f64 * self.write_time
    }

    /// In-place update: pad read to complete the last line, then write.
    fn overwrite_bytes(&mut self, bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }
        let mut time = 0.0;
        let tail = bytes % self.line_width;
        if tail != 0 {
            time += self.read_bytes(self.line_width - tail);
        }
        time += self.write_bytes(bytes);
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
