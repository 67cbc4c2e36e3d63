//! Simulator Configuration.
//!
//! TOML-backed configuration selecting a device preset and the controller's
//! cache-line granularity. Every field has a default, so an empty file (or
//! no file at all) yields a working SSD Samsung840 stack.
//!
//! ```toml
//! [device]
//! preset = "flash-ftl-samsung-k9f1g08u0d"
//!
//! [controller]
//! read_line_bytes = 2048
//! write_line_bytes = 4096
//! ```

use crate::controller::MemoryController;
use crate::disk::Disk;
use crate::error::{Result, SimError};
use crate::model::presets;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_PRESET: &str = "ssd-samsung840";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub controller: ControllerConfig,
}

#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    /// Preset key, see `model::presets::preset_names`.
    #[serde(default = "default_preset")]
    pub preset: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ControllerConfig {
    /// Read cache-line size in bytes; defaults to the device page size.
    #[serde(default)]
    pub read_line_bytes: Option<u64>,

    /// Write cache-line size in bytes; defaults to the device page size.
    #[serde(default)]
    pub write_line_bytes: Option<u64>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

impl Config {
    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Builds the configured device stack.
    ///
    /// # Returns
    ///
    /// A ready [`Disk`], or [`SimError::UnknownDevice`] when the preset key
    /// is not recognized.
    pub fn build_disk(&self) -> Result<Disk> {
        let model = presets::by_name(&self.device.preset)
            .ok_or_else(|| SimError::UnknownDevice(self.device.preset.clone()))?;
        let page = model.page_size().max(1);
        let read_line = self.controller.read_line_bytes.unwrap_or(page);
        let write_line = self.controller.write_line_bytes.unwrap_or(page);
        let controller = MemoryController::with_line_sizes(model, read_line, write_line);
        Ok(Disk::with_controller(controller))
    }
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
