//! Error Types.
//!
//! Cost operations themselves are total functions: on empty or out-of-range
//! input they return a neutral value and log a warning instead of failing.
//! Errors only arise at the construction boundary, when loading a
//! configuration file or resolving a device preset by name.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while building a simulated device stack.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown device preset: {0}")]
    UnknownDevice(String),

    #[error("misconfigured device: {0}")]
    MisconfiguredDevice(String),
}
