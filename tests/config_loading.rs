// tests/config_loading.rs
//! Layered configuration: TOML files and environment overrides

use adc_sync::config::{ConfigError, ConfigLoader, Firmware, ReadoutMode};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

fn clear_env() {
    for key in [
        "ADC_SYNC__SAMPLE_RATE_HZ",
        "ADC_SYNC__FIRMWARE",
        "ADC_SYNC__DEVICE_NAME",
        "ADC_SYNC__MAX_LENGTH",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_sources() {
    clear_env();
    let config = ConfigLoader::new().load().unwrap();
    assert_eq!(config.sample_rate_hz, 1000);
    assert_eq!(config.firmware, Firmware::Buffered);
    assert_eq!(config.device_name, "domain/family/member");
}

#[test]
#[serial]
fn test_file_values() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "adc.toml",
        r#"
        device_name = "p04/adc/1"
        sample_rate_hz = 500
        firmware = "start-flag"
        max_length = 4000
        "#,
    );

    let config = ConfigLoader::from_file(&path).unwrap();
    assert_eq!(config.device_name, "p04/adc/1");
    assert_eq!(config.sample_rate_hz, 500);
    assert_eq!(config.max_length(), 4000);
    assert_eq!(config.max_channels(), 3);
    assert_eq!(config.device_profile().readout, ReadoutMode::Trace);
}

#[test]
#[serial]
fn test_later_files_override_earlier() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let base = write_config(&dir, "base.toml", "sample_rate_hz = 500\nfirmware = \"start-flag\"\n");
    let site = write_config(&dir, "site.toml", "sample_rate_hz = 2000\n");

    let config = ConfigLoader::with_paths(vec![base, site])
        .env_prefix(None)
        .load()
        .unwrap();
    assert_eq!(config.sample_rate_hz, 2000);
    assert_eq!(config.firmware, Firmware::StartFlag);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "adc.toml", "sample_rate_hz = 500\n");

    env::set_var("ADC_SYNC__SAMPLE_RATE_HZ", "2000");
    env::set_var("ADC_SYNC__FIRMWARE", "start-flag");
    let result = ConfigLoader::with_paths(vec![path]).load();
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.sample_rate_hz, 2000);
    assert_eq!(config.firmware, Firmware::StartFlag);
}

#[test]
#[serial]
fn test_invalid_environment_value_rejected() {
    clear_env();
    env::set_var("ADC_SYNC__SAMPLE_RATE_HZ", "0");
    let result = ConfigLoader::new().load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
#[serial]
fn test_custom_profile_from_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "custom.toml",
        r#"
        device_name = "lab/adc/2"

        [profile]
        name = "lab"
        buffer_size_attr = "SizeAttr"
        buffer_index_attr = "IndexAttr"
        state_attr = "StateAttr"
        readout = "buffered"
        default_source = "Data"
        prepare = []

        [profile.state_codes]
        ready = [10]
        acquiring = [20, 21]

        [[profile.start]]
        attribute = "Go"
        value = true

        [[profile.stop]]
        attribute = "Halt"
        value = 1
        "#,
    );

    let config = ConfigLoader::from_file(&path).unwrap();
    let profile = config.device_profile();
    assert_eq!(profile.name, "lab");
    assert_eq!(profile.buffer_index_attr.as_deref(), Some("IndexAttr"));
    assert_eq!(profile.state_codes.acquiring, vec![20, 21]);
    assert!(profile.init.is_empty());
    assert_eq!(profile.stop[0].attribute, "Halt");
}

#[test]
#[serial]
fn test_missing_file_and_bad_profile() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        ConfigLoader::with_paths(vec![missing]).load(),
        Err(ConfigError::FileNotFound(_))
    ));

    let path = write_config(
        &dir,
        "bad.toml",
        r#"
        [profile]
        name = "broken"
        buffer_size_attr = "Size"
        state_attr = "State"
        readout = "trace"
        default_source = "Data"
        prepare = []
        start = []
        stop = []

        [profile.state_codes]
        ready = [1]
        acquiring = [2]
        "#,
    );
    assert!(matches!(
        ConfigLoader::from_file(&path),
        Err(ConfigError::Invalid { .. })
    ));
}
