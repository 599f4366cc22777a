//! Register lookup table and address derivation.
//!
//! The device exposes a flat, byte-addressable register map; each axis owns
//! an identical block of registers offset by `per_axis_stride`. The bridge
//! never hardcodes addresses in its read/write logic — it resolves every
//! access through a [`RegisterLayout`] supplied at initialization.

use crate::consts::{
    DEFAULT_CURRENT_MEASURED, DEFAULT_CURRENT_SETPOINT, DEFAULT_PER_AXIS_STRIDE,
    DEFAULT_POSITION_ESTIMATE, DEFAULT_POSITION_SETPOINT, DEFAULT_REQUESTED_STATE,
    DEFAULT_VELOCITY_ESTIMATE, DEFAULT_VELOCITY_SETPOINT,
};
use serde::{Deserialize, Serialize};

/// Per-axis registers the bridge touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Requested axis state (idle / closed-loop control).
    RequestedState,
    /// Measured phase current (A).
    CurrentMeasured,
    /// Encoder velocity estimate (turns/s).
    VelocityEstimate,
    /// Encoder position estimate (turns).
    PositionEstimate,
    /// Current setpoint (A), effort control.
    CurrentSetpoint,
    /// Velocity setpoint (turns/s), velocity control.
    VelocitySetpoint,
    /// Position setpoint (turns), position control.
    PositionSetpoint,
}

/// Register base addresses for axis 0 plus the per-axis stride.
///
/// Deserializable so a `bridge.toml` can override the defaults for firmware
/// variants with a different endpoint map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterLayout {
    /// Address distance between consecutive axes.
    pub per_axis_stride: u32,
    /// `requested_state` base address.
    pub requested_state: u32,
    /// `Iq_measured` base address.
    pub current_measured: u32,
    /// `vel_estimate` base address.
    pub velocity_estimate: u32,
    /// `pos_estimate` base address.
    pub position_estimate: u32,
    /// `Iq_setpoint` base address.
    pub current_setpoint: u32,
    /// `input_vel` base address.
    pub velocity_setpoint: u32,
    /// `input_pos` base address.
    pub position_setpoint: u32,
}

impl Default for RegisterLayout {
    fn default() -> Self {
        Self {
            per_axis_stride: DEFAULT_PER_AXIS_STRIDE,
            requested_state: DEFAULT_REQUESTED_STATE,
            current_measured: DEFAULT_CURRENT_MEASURED,
            velocity_estimate: DEFAULT_VELOCITY_ESTIMATE,
            position_estimate: DEFAULT_POSITION_ESTIMATE,
            current_setpoint: DEFAULT_CURRENT_SETPOINT,
            velocity_setpoint: DEFAULT_VELOCITY_SETPOINT,
            position_setpoint: DEFAULT_POSITION_SETPOINT,
        }
    }
}

impl RegisterLayout {
    /// Base address of `reg` for axis 0.
    pub fn base(&self, reg: Register) -> u32 {
        match reg {
            Register::RequestedState => self.requested_state,
            Register::CurrentMeasured => self.current_measured,
            Register::VelocityEstimate => self.velocity_estimate,
            Register::PositionEstimate => self.position_estimate,
            Register::CurrentSetpoint => self.current_setpoint,
            Register::VelocitySetpoint => self.velocity_setpoint,
            Register::PositionSetpoint => self.position_setpoint,
        }
    }

    /// Physical address of `reg` on the given axis.
    ///
    /// Derived as `base + axis * per_axis_stride`; never stored.
    pub fn address(&self, reg: Register, axis: u8) -> u32 {
        self.base(reg) + u32::from(axis) * self.per_axis_stride
    }
}
