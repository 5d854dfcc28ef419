use aoip_bandwidth::calculator::{builtin_presets, CalculatorInputs};
use aoip_bandwidth::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

/// Configuration loading from TOML files
/// Environment overrides live in their own test binary to avoid cross-test leakage

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes()).expect("Failed to write temp config");
    file
}

#[test]
fn test_defaults_without_file() {
    let config = AppConfig::default();
    assert_eq!(config.defaults, CalculatorInputs::default());
    assert_eq!(config.presets, builtin_presets());
    assert!(config.validate().is_ok());
}

#[test]
fn test_file_overrides_defaults() {
    let file = toml_file(
        r#"
[defaults]
channels = 8
sample_rate = 96000
packet_time = 0.000125
"#,
    );

    let config = AppConfig::load(Some(file.path())).expect("config should load");
    assert_eq!(config.defaults.channels, 8);
    assert_eq!(config.defaults.sample_rate, 96_000);
    assert_eq!(config.defaults.packet_time, 0.000_125);
    // Unset keys keep their defaults
    assert_eq!(config.defaults.bit_depth, 24);
    assert_eq!(config.defaults.streams, 1);
    assert_eq!(config.presets, builtin_presets());
}

#[test]
fn test_file_replaces_presets() {
    let file = toml_file(
        r#"
[[presets]]
label = "Console"
channels = 48

[[presets]]
label = "Broadcast"
channels = 16
sample_rate = 96000
packet_time = 0.000125
"#,
    );

    let config = AppConfig::load(Some(file.path())).expect("config should load");
    assert_eq!(config.presets.len(), 2);
    assert_eq!(config.presets[0].label, "Console");
    assert_eq!(config.presets[0].inputs(), CalculatorInputs::new(48, 48_000, 24, 0.001, 1));
    assert_eq!(config.presets[1].inputs(), CalculatorInputs::new(16, 96_000, 24, 0.000_125, 1));
}

#[test]
fn test_invalid_defaults_are_rejected() {
    let file = toml_file(
        r#"
[defaults]
packet_time = 0.0
"#,
    );

    let err = AppConfig::load(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("packet_time"));
}

#[test]
fn test_invalid_preset_is_rejected() {
    let file = toml_file(
        r#"
[[presets]]
label = "Too wide"
channels = 512
"#,
    );

    let err = AppConfig::load(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("Too wide"));
}

#[test]
fn test_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(AppConfig::load(Some(&missing)).is_err());
}
