//! Per-joint runtime state and control modes.

use odrive_common::consts::{AXIS_STATE_CLOSED_LOOP_CONTROL, AXIS_STATE_IDLE};

/// Which command stream the framework currently claims for a joint.
///
/// Starts as `Undefined` (no consumer has claimed the joint) and is never
/// reset automatically; only an external caller changes it. The write pass
/// skips joints in `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// No consumer is driving this joint.
    #[default]
    Undefined,
    /// Torque commands drive the current setpoint.
    Effort,
    /// Velocity commands drive the velocity setpoint.
    Velocity,
    /// Position commands drive the position setpoint.
    Position,
}

/// Requested device-side state, transmitted identically to every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    /// Axis disabled, motor unpowered.
    Idle,
    /// Axis under closed-loop control.
    ClosedLoopControl,
}

impl AxisState {
    /// Value written to the requested-state register.
    pub fn register_value(self) -> f32 {
        match self {
            Self::Idle => AXIS_STATE_IDLE,
            Self::ClosedLoopControl => AXIS_STATE_CLOSED_LOOP_CONTROL,
        }
    }
}

/// Per-joint runtime state, owned exclusively by the bridge.
///
/// Measured values stay NaN until the first successful read so callers can
/// distinguish "never read" from a valid reading. Commanded values default
/// to zero.
#[derive(Debug, Clone, Copy)]
pub struct JointState {
    /// Commanded joint angle (rad).
    pub commanded_position: f64,
    /// Commanded joint velocity (rad/s).
    pub commanded_velocity: f64,
    /// Commanded joint torque (N·m).
    pub commanded_effort: f64,
    /// Measured joint angle (rad); NaN before the first successful read.
    pub measured_position: f64,
    /// Measured joint velocity (rad/s); NaN before the first successful read.
    pub measured_velocity: f64,
    /// Measured joint torque (N·m); NaN before the first successful read.
    pub measured_effort: f64,
    /// Active command stream.
    pub control_mode: ControlMode,
}

impl Default for JointState {
    fn default() -> Self {
        Self {
            commanded_position: 0.0,
            commanded_velocity: 0.0,
            commanded_effort: 0.0,
            measured_position: f64::NAN,
            measured_velocity: f64::NAN,
            measured_effort: f64::NAN,
            control_mode: ControlMode::Undefined,
        }
    }
}

impl JointState {
    /// True once all measured values have been populated by a read pass.
    pub fn has_feedback(&self) -> bool {
        !self.measured_position.is_nan()
            && !self.measured_velocity.is_nan()
            && !self.measured_effort.is_nan()
    }
}
