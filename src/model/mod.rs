//! Device Technology Cost Models.
//!
//! This module defines the `MemoryModel` trait and implementations for the
//! supported storage technologies. A model is a pure analytical cost
//! function: it converts a byte count into simulated elapsed seconds and
//! tracks cumulative wear-out, without storing any data.
//!
//! Every model obeys the same ground rules:
//!
//! * `bytes == 0` returns `0.0` seconds and mutates nothing.
//! * Wear-out is monotonically non-decreasing except for `reset_state`.
//! * Cost is deterministic over the model's own state only.

/// Raw and FTL-managed Flash NAND models.
pub mod flash;

/// Non-operational column overlay aggregator.
pub mod overlay;

/// Byte-addressable phase-change memory model.
pub mod pcm;

/// Device preset constant tables.
pub mod presets;

/// Tiered random/sequential SSD model.
pub mod ssd;

pub use flash::{FlashNandFtl, FlashNandRaw, FlashTimings};
pub use overlay::ColumnOverlayModel;
pub use pcm::PcmModel;
pub use ssd::{SsdModel, SsdTimings};

/// Trait for device technology cost models.
///
/// Implementations own their technology constants and wear-out counter.
/// The trait is object-safe; owning layers hold a `Box<dyn MemoryModel>`
/// and replicate it through [`MemoryModel::clone_model`].
pub trait MemoryModel {
    /// Returns the user-friendly name of the device model.
    ///
    /// Used for reporting and logging purposes.
    fn name(&self) -> &str;

    /// Returns the page size in bytes.
    ///
    /// Byte-addressable PCM reuses this field as its memory-line width.
    fn page_size(&self) -> u64;

    /// Returns the erase-block size in bytes.
    ///
    /// Always a multiple of the page size; `0` for byte-addressable
    /// technologies without an erase block.
    fn block_size(&self) -> u64;

    /// Estimates the time to read `bytes` bytes.
    fn read_bytes(&mut self, bytes: u64) -> f64;

    /// Estimates the time to write `bytes` bytes to clean storage and
    /// advances the wear-out counter.
    fn write_bytes(&mut self, bytes: u64) -> f64;

    /// Estimates the time to overwrite `bytes` bytes in place, including
    /// any read-before-write or erase cost the technology requires.
    fn overwrite_bytes(&mut self, bytes: u64) -> f64;

    /// Returns the cumulative number of bytes physically programmed.
    fn wear_out(&self) -> u64;

    /// Resets the wear-out counter. Other device state is preserved.
    fn reset_state(&mut self);

    /// Returns an independent deep copy of this model.
    fn clone_model(&self) -> Box<dyn MemoryModel>;
}

impl Clone for Box<dyn MemoryModel> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

impl std::fmt::Debug for dyn MemoryModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryModel")
            .field("name", &self.name())
            .field("page_size", &self.page_size())
            .field("block_size", &self.block_size())
            .field("wear_out", &self.wear_out())
            .finish()
    }
}
