//! Integration tests for configuration parsing and stack construction.

use memcost::config::Config;
use memcost::SimError;

/// Tests that the default configuration builds the Samsung840 stack.
#[test]
fn test_default_config() {
    let disk = Config::default().build_disk().expect("default stack");
    assert_eq!(disk.model().name(), "SSD Samsung840");
    assert_eq!(disk.controller().read_line_bytes(), 8192);
    assert_eq!(disk.controller().write_line_bytes(), 8192);
}

/// Tests an empty TOML document: every field defaults.
#[test]
fn test_empty_toml_defaults() {
    let config: Config = toml::from_str("").expect("empty config parses");
    assert_eq!(config.device.preset, "ssd-samsung840");
    assert!(config.controller.read_line_bytes.is_none());
}

/// Tests preset selection and explicit cache-line sizes.
#[test]
fn test_full_toml() {
    let config: Config = toml::from_str(
        r#"
        [device]
        preset = "flash-ftl-samsung-k9f1g08u0d"

        [controller]
        read_line_bytes = 2048
        write_line_bytes = 4096
        "#,
    )
    .expect("config parses");

    let disk = config.build_disk().expect("stack builds");
    assert_eq!(disk.model().name(), "FlashNandFTL SamsungK9F1G08U0D");
    assert_eq!(disk.controller().read_line_bytes(), 2048);
    assert_eq!(disk.controller().write_line_bytes(), 4096);
}

/// Tests that PCM defaults its cache lines to the memory-line width.
#[test]
fn test_pcm_line_defaults() {
    let config: Config = toml::from_str("[device]\npreset = \"pcm-default\"\n")
        .expect("config parses");
    let disk = config.build_disk().expect("stack builds");
    assert_eq!(disk.controller().read_line_bytes(), 64);
    assert_eq!(disk.controller().write_line_bytes(), 64);
}

/// Tests the unknown-preset error path.
#[test]
fn test_unknown_preset_rejected() {
    let config: Config =
        toml::from_str("[device]\npreset = \"ssd-made-up\"\n").expect("config parses");
    match config.build_disk() {
        Err(SimError::UnknownDevice(name)) => assert_eq!(name, "ssd-made-up"),
        other => panic!("expected UnknownDevice, got {:?}", other.map(|d| d.to_string())),
    }
}
