//! Bridge constants.
//!
//! Register layout defaults, device state values and fixed motor constants
//! shared across the workspace.

/// Maximum number of joints/axes a single bridge instance may drive.
pub const MAX_AXES: usize = 8;

/// Default control cycle time in microseconds (1 kHz).
pub const DEFAULT_CYCLE_TIME_US: u32 = 1000;

/// Fixed motor torque constant in N·m per Ampere per unit KV.
///
/// `torque = current * 8.27 / KV`, the standard BLDC approximation used by
/// the ODrive firmware.
pub const TORQUE_CONSTANT: f64 = 8.27;

/// Device state value for an idle (disabled) axis.
pub const AXIS_STATE_IDLE: f32 = 1.0;

/// Device state value for closed-loop control.
pub const AXIS_STATE_CLOSED_LOOP_CONTROL: f32 = 8.0;

// ─── Default register layout ────────────────────────────────────────
//
// Endpoint addresses of axis 0; axis N is reached by adding
// N * DEFAULT_PER_AXIS_STRIDE.

/// Address distance between consecutive axes in the register map.
pub const DEFAULT_PER_AXIS_STRIDE: u32 = 302;

/// `axis.requested_state` register.
pub const DEFAULT_REQUESTED_STATE: u32 = 142;

/// `axis.motor.current_control.Iq_measured` register.
pub const DEFAULT_CURRENT_MEASURED: u32 = 181;

/// `axis.encoder.vel_estimate` register (turns/s).
pub const DEFAULT_VELOCITY_ESTIMATE: u32 = 249;

/// `axis.encoder.pos_estimate` register (turns).
pub const DEFAULT_POSITION_ESTIMATE: u32 = 248;

/// `axis.motor.current_control.Iq_setpoint` register.
pub const DEFAULT_CURRENT_SETPOINT: u32 = 180;

/// `axis.controller.input_vel` register (turns/s).
pub const DEFAULT_VELOCITY_SETPOINT: u32 = 195;

/// `axis.controller.input_pos` register (turns).
pub const DEFAULT_POSITION_SETPOINT: u32 = 194;
