//! Analytical Storage-Device Cost-Model Simulator Library.
//!
//! This crate implements an in-process cost model for storage devices and the
//! cache layer sitting on top of them. Given a logical byte-range operation
//! (read, write, overwrite) it returns an estimated elapsed time in simulated
//! seconds and accumulates wear-out and traffic counters, without touching
//! real hardware. Index structures and workload drivers use it to answer
//! "how long would this operation take on device X" purely analytically.
//!
//! # Architecture
//!
//! * **Model**: per-technology physical cost formulas (SSD, Flash NAND raw
//!   and FTL-managed, PCM) behind one object-safe trait.
//! * **Controller**: a logical write-back cache that coalesces repeated
//!   touches to the same cache line and defers write cost to an explicit
//!   flush.
//! * **Disk**: the public facade that forwards to the controller and keeps
//!   an independent traffic ledger.
//!
//! Ownership is strictly single-owner top-down (Disk → MemoryController →
//! MemoryModel); deep cloning is the only replication mechanism and always
//! yields fully independent state.
//!
//! # Modules
//!
//! * `config`: Configuration loading and parsing.
//! * `controller`: Write-back cache layer over one device model.
//! * `counters`: Named counter accumulators with derived ratio counters.
//! * `disk`: Public timing facade and traffic ledger.
//! * `error`: Error types for configuration and preset lookup.
//! * `model`: Device technology cost models and presets.

/// Configuration system for device selection and cache-line sizing.
///
/// Loads and parses TOML configuration files to pick a device preset and
/// customize the controller's read/write cache-line granularity.
pub mod config;

/// Write-back cache layer translating logical byte ranges into deferred
/// physical cost.
///
/// Tracks warm read lines, pending write lines, and per-line dirty bitmaps
/// for partial overwrites; realizes all deferred cost on `flush_cache`.
pub mod controller;

/// Named counter accumulators.
///
/// A keyed mapping from small stable counter ids to named numeric values,
/// with read-only ratio counters computed on demand from other counters.
pub mod counters;

/// Public disk facade.
///
/// Forwards every operation to the controller and pegs an independent
/// traffic ledger, including delta-pegging of deferred cost across flushes.
pub mod disk;

/// Error types for configuration loading and device preset lookup.
pub mod error;

/// Device technology cost models.
///
/// Implements the physical cost formulas for SSD, raw and FTL-managed Flash
/// NAND, and PCM, the non-operational column overlay aggregator, and the
/// device preset tables.
pub mod model;

pub use controller::MemoryController;
pub use counters::CounterManager;
pub use disk::Disk;
pub use error::{Result, SimError};
pub use model::MemoryModel;
