//! Device Preset Tables.
//!
//! Constant timing and geometry tables for the supported devices, plus a
//! name-based lookup used by the configuration layer. Timing figures are
//! datasheet values for the named parts; geometry is pages-per-block based,
//! so `block_size = page_size * pages_per_block`.

use super::flash::{FlashNandFtl, FlashNandRaw, FlashTimings};
use super::pcm::PcmModel;
use super::ssd::{SsdModel, SsdTimings};
use super::MemoryModel;

const SAMSUNG_840_PAGE: u64 = 8192;
const SAMSUNG_840_PAGES_PER_BLOCK: u64 = 64;
const SAMSUNG_840_TIMINGS: SsdTimings = SsdTimings {
    read_random: 21e-6,
    write_random: 45e-6,
    read_seq: 14e-6,
    write_seq: 15.3e-6,
    block_erase: 210e-6 * 64.0,
};

const INTEL_DC_P4511_PAGE: u64 = 4096;
const INTEL_DC_P4511_PAGES_PER_BLOCK: u64 = 64;
const INTEL_DC_P4511_TIMINGS: SsdTimings = SsdTimings {
    read_random: 77e-6,
    write_random: 18e-6,
    read_seq: 12e-6,
    write_seq: 13.9e-6,
    block_erase: 300e-6 * 64.0,
};

const TOSHIBA_VX500_PAGE: u64 = 4096;
const TOSHIBA_VX500_PAGES_PER_BLOCK: u64 = 64;
const TOSHIBA_VX500_TIMINGS: SsdTimings = SsdTimings {
    read_random: 35e-6,
    write_random: 50e-6,
    read_seq: 17e-6,
    write_seq: 19e-6,
    block_erase: 250e-6 * 64.0,
};

const SAMSUNG_K9F1G08U0D_PAGE: u64 = 2048;
const SAMSUNG_K9F1G08U0D_PAGES_PER_BLOCK: u64 = 32;
const SAMSUNG_K9F1G08U0D_TIMINGS: FlashTimings = FlashTimings {
    read: 35e-6,
    write: 250e-6,
    block_erase: 2000e-6,
};

const MICRON_MT29F1G08_PAGE: u64 = 2048;
const MICRON_MT29F1G08_PAGES_PER_BLOCK: u64 = 64;
const MICRON_MT29F1G08_TIMINGS: FlashTimings = FlashTimings {
    read: 25e-6,
    write: 200e-6,
    block_erase: 700e-6,
};

const MICRON_MT29F4G08_PAGE: u64 = 4096;
const MICRON_MT29F4G08_PAGES_PER_BLOCK: u64 = 64;
const MICRON_MT29F4G08_TIMINGS: FlashTimings = FlashTimings {
    read: 25e-6,
    write: 220e-6,
    block_erase: 700e-6,
};

const PCM_DEFAULT_LINE: u64 = 64;
const PCM_DEFAULT_READ: f64 = 50e-9;
const PCM_DEFAULT_WRITE: f64 = 1e-6;

/// `SSD Samsung840` preset.
pub fn ssd_samsung_840() -> SsdModel {
    SsdModel::new(
        "SSD Samsung840",
        SAMSUNG_840_PAGE,
        SAMSUNG_840_PAGES_PER_BLOCK,
        SAMSUNG_840_TIMINGS,
    )
}

/// `SSD IntelDCP4511` preset.
pub fn ssd_intel_dc_p4511() -> SsdModel {
    SsdModel::new(
        "SSD IntelDCP4511",
        INTEL_DC_P4511_PAGE,
        INTEL_DC_P4511_PAGES_PER_BLOCK,
        INTEL_DC_P4511_TIMINGS,
    )
}

/// `SSD ToshibaVX500` preset.
pub fn ssd_toshiba_vx500() -> SsdModel {
    SsdModel::new(
        "SSD ToshibaVX500",
        TOSHIBA_VX500_PAGE,
        TOSHIBA_VX500_PAGES_PER_BLOCK,
        TOSHIBA_VX500_TIMINGS,
    )
}

/// `FlashNandFTL SamsungK9F1G08U0D` preset.
pub fn flash_ftl_samsung_k9f1g08u0d() -> FlashNandFtl {
    FlashNandFtl::new(
        "FlashNandFTL SamsungK9F1G08U0D",
        SAMSUNG_K9F1G08U0D_PAGE,
        SAMSUNG_K9F1G08U0D_PAGES_PER_BLOCK,
        SAMSUNG_K9F1G08U0D_TIMINGS,
    )
}

/// `FlashNandRaw SamsungK9F1G08U0D` preset.
pub fn flash_raw_samsung_k9f1g08u0d() -> FlashNandRaw {
    FlashNandRaw::new(
        "FlashNandRaw SamsungK9F1G08U0D",
        SAMSUNG_K9F1G08U0D_PAGE,
        SAMSUNG_K9F1G08U0D_PAGES_PER_BLOCK,
        SAMSUNG_K9F1G08U0D_TIMINGS,
    )
}

/// `FlashNandFTL MicronMT29F1G08` preset.
pub fn flash_ftl_micron_mt29f1g08() -> FlashNandFtl {
    FlashNandFtl::new(
        "FlashNandFTL MicronMT29F1G08",
        MICRON_MT29F1G08_PAGE,
        MICRON_MT29F1G08_PAGES_PER_BLOCK,
        MICRON_MT29F1G08_TIMINGS,
    )
}

/// `FlashNandRaw MicronMT29F1G08` preset.
pub fn flash_raw_micron_mt29f1g08() -> FlashNandRaw {
    FlashNandRaw::new(
        "FlashNandRaw MicronMT29F1G08",
        MICRON_MT29F1G08_PAGE,
        MICRON_MT29F1G08_PAGES_PER_BLOCK,
        MICRON_MT29F1G08_TIMINGS,
    )
}

/// `FlashNandFTL MicronMT29F4G08` preset.
pub fn flash_ftl_micron_mt29f4g08() -> FlashNandFtl {
    FlashNandFtl::new(
        "FlashNandFTL MicronMT29F4G08",
        MICRON_MT29F4G08_PAGE,
        MICRON_MT29F4G08_PAGES_PER_BLOCK,
        MICRON_MT29F4G08_TIMINGS,
    )
}

/// `FlashNandRaw MicronMT29F4G08` preset.
pub fn flash_raw_micron_mt29f4g08() -> FlashNandRaw {
    FlashNandRaw::new(
        "FlashNandRaw MicronMT29F4G08",
        MICRON_MT29F4G08_PAGE,
        MICRON_MT29F4G08_PAGES_PER_BLOCK,
        MICRON_MT29F4G08_TIMINGS,
    )
}

/// `PCM DefaultModel` preset.
pub fn pcm_default() -> PcmModel {
    PcmModel::new(
        "PCM DefaultModel",
        PCM_DEFAULT_LINE,
        PCM_DEFAULT_READ,
        PCM_DEFAULT_WRITE,
    )
}

/// Resolves a preset by its configuration key.
///
/// # Returns
///
/// `None` when the key names no known device.
pub fn by_name(name: &str) -> Option<Box<dyn MemoryModel>> {
    match name {
        "ssd-samsung840" => Some(Box::new(ssd_samsung_840())),
        "ssd-intel-dc-p4511" => Some(Box::new(ssd_intel_dc_p4511())),
        "ssd-toshiba-vx500" => Some(Box::new(ssd_toshiba_vx500())),
        "flash-ftl-samsung-k9f1g08u0d" => Some(Box::new(flash_ftl_samsung_k9f1g08u0d())),
        "flash-raw-samsung-k9f1g08u0d" => Some(Box::new(flash_raw_samsung_k9f1g08u0d())),
        "flash-ftl-micron-mt29f1g08" => Some(Box::new(flash_ftl_micron_mt29f1g08())),
        "flash-raw-micron-mt29f1g08" => Some(Box::new(flash_raw_micron_mt29f1g08())),
        "flash-ftl-micron-mt29f4g08" => Some(Box::new(flash_ftl_micron_mt29f4g08())),
        "flash-raw-micron-mt29f4g08" => Some(Box::new(flash_raw_micron_mt29f4g08())),
        "pcm-default" => Some(Box::new(pcm_default())),
        _ => None,
    }
}

/// Lists every preset configuration key.
pub fn preset_names() -> &'static [&'static str] {
    &[
        "ssd-samsung840",
        "ssd-intel-dc-p4511",
        "ssd-toshiba-vx500",
        "flash-ftl-samsung-k9f1g08u0d",
        "flash-raw-samsung-k9f1g08u0d",
        "flash-ftl-micron-mt29f1g08",
        "flash-raw-micron-mt29f1g08",
        "flash-ftl-micron-mt29f4g08",
        "flash-raw-micron-mt29f4g08",
        "pcm-default",
    ]
}
