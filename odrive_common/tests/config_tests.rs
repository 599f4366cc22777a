//! Bridge configuration file tests.
//!
//! Tests for `BridgeConfig::load()`: TOML parsing, defaults, register
//! layout overrides and joint spec extraction from files on disk.

use odrive_common::config::{BridgeConfig, configure_joints};
use odrive_common::consts::DEFAULT_CYCLE_TIME_US;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a bridge.toml with the given content and return its path.
fn write_bridge_toml(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("bridge.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_minimal_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_bridge_toml(&tmp, "");

    let config = BridgeConfig::load(&path).unwrap();
    assert_eq!(config.cycle_time_us, DEFAULT_CYCLE_TIME_US);
    assert!(config.joints.is_empty());
}

#[test]
fn load_full_config_with_joints() {
    let tmp = TempDir::new().unwrap();
    let path = write_bridge_toml(
        &tmp,
        r#"
cycle_time_us = 500

[[joints]]
name = "base"
command_interfaces = ["position", "velocity", "effort"]
state_interfaces = ["position", "velocity", "effort"]

[joints.parameters]
axis = "0"
KV = "100"
"#,
    );

    let config = BridgeConfig::load(&path).unwrap();
    assert_eq!(config.cycle_time_us, 500);
    assert_eq!(config.joints.len(), 1);

    let joints = configure_joints(&config.joints).unwrap();
    assert_eq!(joints[0].name, "base");
    assert_eq!(joints[0].axis, 0);
    assert_eq!(joints[0].kv, 100.0);
}

#[test]
fn load_register_layout_override() {
    let tmp = TempDir::new().unwrap();
    let path = write_bridge_toml(
        &tmp,
        r#"
[registers]
per_axis_stride = 1024
requested_state = 7
"#,
    );

    let config = BridgeConfig::load(&path).unwrap();
    assert_eq!(config.registers.per_axis_stride, 1024);
    assert_eq!(config.registers.requested_state, 7);
    // Unlisted bases keep their defaults.
    assert_ne!(config.registers.position_setpoint, 0);
}

#[test]
fn load_rejects_missing_file() {
    let tmp = TempDir::new().unwrap();
    let result = BridgeConfig::load(&tmp.path().join("nonexistent.toml"));
    assert!(result.is_err());
}

#[test]
fn load_rejects_malformed_toml() {
    let tmp = TempDir::new().unwrap();
    let path = write_bridge_toml(&tmp, "joints = 5");
    assert!(BridgeConfig::load(&path).is_err());
}

#[test]
fn joint_validation_failure_surfaces_from_file_specs() {
    let tmp = TempDir::new().unwrap();
    let path = write_bridge_toml(
        &tmp,
        r#"
[[joints]]
name = "bad"
command_interfaces = ["position"]
state_interfaces = ["position", "velocity", "effort"]

[joints.parameters]
axis = "0"
KV = "100"
"#,
    );

    let config = BridgeConfig::load(&path).unwrap();
    let err = configure_joints(&config.joints).unwrap_err();
    assert!(err.to_string().contains("bad"));
}
