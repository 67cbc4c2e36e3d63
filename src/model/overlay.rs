//! Column Overlay Aggregator.
//!
//! A non-operational model used by column stores that share one physical
//! device abstraction: it sums wear-out absorbed from the per-column models
//! but never charges any cost itself. Read/write/overwrite requests against
//! the overlay indicate a routing mistake in the caller and are answered
//! with a warning and zero cost.

use super::MemoryModel;
use tracing::warn;

/// Counter-accumulation sink shared by multiple column stores.
#[derive(Debug, Clone)]
pub struct ColumnOverlayModel {
    name: String,
    columns: usize,
    absorbed_bytes: u64,
}

impl ColumnOverlayModel {
    /// Creates an overlay for `columns` column stores.
    ///
    /// An overlay over fewer than two columns is structurally pointless;
    /// this is logged but does not abort construction.
    pub fn new(name: impl Into<String>, columns: usize) -> Self {
        let name = name.into();
        if columns < 2 {
            warn!(
                model = %name,
                columns,
                "column overlay created with fewer than two columns"
            );
        }
        Self {
            name,
            columns,
            absorbed_bytes: 0,
        }
    }

    /// Returns the number of columns sharing this overlay.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Adds one column model's current wear-out into the aggregate.
    pub fn absorb(&mut self, column: &dyn MemoryModel) {
        self.absorbed_bytes += column.wear_out();
    }

    /// Adds raw programmed bytes into the aggregate.
    pub fn absorb_wear(&mut self, bytes: u64) {
        self.absorbed_bytes += bytes;
    }
}

impl MemoryModel for ColumnOverlayModel {
    fn name(&self) -> &str {
        &self.name
    }

    /// Non-operational; the overlay has no physical geometry.
    fn page_size(&self) -> u64 {
        0
    }

    fn block_size(&self) -> u64 {
        0
    }

    fn read_bytes(&mut self, bytes: u64) -> f64 {
        warn!(model = %self.name, bytes, "read issued against column overlay");
        0.0
    }

    fn write_bytes(&mut self, bytes: u64) -> f64 {
        warn!(model = %self.name, bytes, "write issued against column overlay");
        0.0
    }

    fn overwrite_bytes(&mut self, bytes: u64) -> f64 {
        warn!(model = %self.name, bytes, "overwrite issued against column overlay");
        0.0
    }

    fn wear_out(&self) -> u64 {
        self.absorbed_bytes
    }

    fn reset_state(&mut self) {
        self.absorbed_bytes = 0;
    }

    fn clone_model(&self) -> Box<dyn MemoryModel> {
        Box::new(self.clone())
    }
}
