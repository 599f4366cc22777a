//! Joint specification, validation and bridge configuration.
//!
//! This module contains the configuration types for the actuator bridge:
//! - `JointSpec` - Per-joint declaration handed over by the framework
//! - `JointConfig` - Validated, immutable per-joint configuration
//! - `InterfaceKind` - The three recognized interface kinds
//! - `BridgeConfig` - Main configuration loaded from bridge.toml

use crate::consts::{DEFAULT_CYCLE_TIME_US, MAX_AXES};
use crate::error::BridgeError;
use crate::registers::RegisterLayout;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default function for cycle_time_us
fn default_cycle_time_us() -> u32 {
    DEFAULT_CYCLE_TIME_US
}

/// The three interface kinds a joint exposes on both its command and state
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// Joint angle in radians.
    Position,
    /// Joint angular velocity in radians per second.
    Velocity,
    /// Joint torque in N·m.
    Effort,
}

impl InterfaceKind {
    /// All kinds, in the order they are exported.
    pub const ALL: [InterfaceKind; 3] = [
        InterfaceKind::Position,
        InterfaceKind::Velocity,
        InterfaceKind::Effort,
    ];

    /// Parse an interface name as declared in a joint spec.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "position" => Some(Self::Position),
            "velocity" => Some(Self::Velocity),
            "effort" => Some(Self::Effort),
            _ => None,
        }
    }

    /// Canonical interface name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Effort => "effort",
        }
    }
}

/// Per-joint declaration handed over by the motion-control framework (or
/// loaded from `bridge.toml`).
///
/// `parameters` carries the required string keys `axis` and `KV`; both are
/// parsed during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointSpec {
    /// Joint name (unique identifier).
    pub name: String,

    /// Declared command interface names; must be exactly
    /// {"position", "velocity", "effort"}.
    pub command_interfaces: Vec<String>,

    /// Declared state interface names; same shape as the command side.
    pub state_interfaces: Vec<String>,

    /// String parameter map; requires `axis` (integer ≥ 0) and `KV`
    /// (positive number).
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Validated per-joint configuration. Immutable after configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct JointConfig {
    /// Joint name.
    pub name: String,
    /// Physical axis index on the motor controller.
    pub axis: u8,
    /// Motor constant (KV) relating current to torque. Always > 0.
    pub kv: f64,
}

/// Validate all joint specs and produce the immutable joint configurations.
///
/// All-or-nothing: the first violated check aborts configuration for the
/// whole bridge with a [`BridgeError::Config`] naming the offending joint.
///
/// # Validation Rules
/// 1. Exactly 3 command and 3 state interfaces per joint.
/// 2. Each side's declared kinds form exactly the set
///    {position, velocity, effort} with no duplicates.
/// 3. `axis` parameter present, parses as integer, 0 ≤ axis < MAX_AXES.
/// 4. `KV` parameter present, parses as a finite number > 0.
/// 5. Joint names unique; axis indices unique.
pub fn configure_joints(specs: &[JointSpec]) -> Result<Vec<JointConfig>, BridgeError> {
    let mut configs = Vec::with_capacity(specs.len());

    for spec in specs {
        validate_interface_set(&spec.name, "command", &spec.command_interfaces)?;
        validate_interface_set(&spec.name, "state", &spec.state_interfaces)?;

        let axis = parse_axis(spec)?;
        let kv = parse_kv(spec)?;

        info!("Configured joint '{}': axis={}, KV={}", spec.name, axis, kv);
        configs.push(JointConfig {
            name: spec.name.clone(),
            axis,
            kv,
        });
    }

    // Check for duplicate joint names
    let mut names = std::collections::HashSet::new();
    for config in &configs {
        if !names.insert(&config.name) {
            return Err(BridgeError::Config(format!(
                "Duplicate joint name: {}",
                config.name
            )));
        }
    }

    // Check for duplicate axis indices (required for correct addressing)
    let mut axes = std::collections::HashSet::new();
    for config in &configs {
        if !axes.insert(config.axis) {
            return Err(BridgeError::Config(format!(
                "Joint '{}': axis {} is already assigned to another joint",
                config.name, config.axis
            )));
        }
    }

    Ok(configs)
}

/// Validate that `names` declares exactly the set
/// {position, velocity, effort}, each once.
fn validate_interface_set(
    joint: &str,
    side: &str,
    names: &[String],
) -> Result<(), BridgeError> {
    if names.len() != 3 {
        return Err(BridgeError::Config(format!(
            "Joint '{}' has {} {} interfaces, 3 expected",
            joint,
            names.len(),
            side
        )));
    }

    let mut seen = std::collections::HashSet::new();
    for name in names {
        let kind = InterfaceKind::parse(name).ok_or_else(|| {
            BridgeError::Config(format!(
                "Joint '{}' declares unknown {} interface '{}'; expected position, velocity or effort",
                joint, side, name
            ))
        })?;
        if !seen.insert(kind) {
            return Err(BridgeError::Config(format!(
                "Joint '{}' declares duplicate {} interface '{}'",
                joint, side, name
            )));
        }
    }

    Ok(())
}

/// Parse the required `axis` parameter.
fn parse_axis(spec: &JointSpec) -> Result<u8, BridgeError> {
    let raw = spec.parameters.get("axis").ok_or_else(|| {
        BridgeError::Config(format!("Joint '{}': missing parameter 'axis'", spec.name))
    })?;
    let axis: u8 = raw.trim().parse().map_err(|_| {
        BridgeError::Config(format!(
            "Joint '{}': parameter 'axis' is not a valid axis index: '{}'",
            spec.name, raw
        ))
    })?;
    if usize::from(axis) >= MAX_AXES {
        return Err(BridgeError::Config(format!(
            "Joint '{}': axis {} out of range (max {})",
            spec.name,
            axis,
            MAX_AXES - 1
        )));
    }
    Ok(axis)
}

/// Parse the required `KV` parameter.
fn parse_kv(spec: &JointSpec) -> Result<f64, BridgeError> {
    let raw = spec.parameters.get("KV").ok_or_else(|| {
        BridgeError::Config(format!("Joint '{}': missing parameter 'KV'", spec.name))
    })?;
    let kv: f64 = raw.trim().parse().map_err(|_| {
        BridgeError::Config(format!(
            "Joint '{}': parameter 'KV' is not a number: '{}'",
            spec.name, raw
        ))
    })?;
    if !kv.is_finite() || kv <= 0.0 {
        return Err(BridgeError::Config(format!(
            "Joint '{}': KV must be a finite number > 0 (got {})",
            spec.name, kv
        )));
    }
    Ok(kv)
}

/// Main configuration loaded from `bridge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Control cycle time in microseconds.
    /// Defaults to DEFAULT_CYCLE_TIME_US (1000μs) if omitted.
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,

    /// Register layout override; defaults match stock firmware.
    #[serde(default)]
    pub registers: RegisterLayout,

    /// Joint declarations.
    #[serde(default)]
    pub joints: Vec<JointSpec>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            cycle_time_us: DEFAULT_CYCLE_TIME_US,
            registers: RegisterLayout::default(),
            joints: Vec::new(),
        }
    }
}

impl BridgeConfig {
    /// Load a bridge configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        info!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: BridgeConfig = toml::from_str(&content).map_err(|e| {
            BridgeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if config.cycle_time_us == 0 {
            return Err(BridgeError::Config(
                "cycle_time_us must be greater than 0".to_string(),
            ));
        }

        info!(
            "Loaded config: {} joints, cycle_time={}us",
            config.joints.len(),
            config.cycle_time_us
        );
        Ok(config)
    }
}
