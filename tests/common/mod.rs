//! Common test utilities and helpers for integration tests

use blockfilter_core::{AppConfig, BlockDevice};
use std::path::PathBuf;

/// Get the path to test fixtures
pub fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("tests").join("fixtures")
}

/// Load a filter configuration fixture
pub fn load_config(name: &str) -> AppConfig {
    let path = fixtures_dir().join(name);
    AppConfig::from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load config fixture {:?}: {}", path, e))
}

/// Load the discovered devices fixture
pub fn load_devices() -> Vec<BlockDevice> {
    let path = fixtures_dir().join("devices.yaml");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read devices fixture from {:?}", path));
    serde_yaml::from_str(&content).expect("Failed to parse devices fixture")
}

/// Find a device by path in the fixture list
pub fn device<'a>(devices: &'a [BlockDevice], path: &str) -> &'a BlockDevice {
    devices
        .iter()
        .find(|d| d.path == path)
        .unwrap_or_else(|| panic!("No fixture device {}", path))
}
