//! Bridge lifecycle and the cyclic I/O engine.
//!
//! `OdriveBridge` is the single object the motion-control framework talks
//! to. Lifecycle: [`OdriveBridge::new`] (configure) → [`OdriveBridge::start`]
//! ↔ [`OdriveBridge::stop`], with [`OdriveBridge::read`] and
//! [`OdriveBridge::write`] called once per control cycle in between.
//!
//! The bridge owns the register transport exclusively; it is acquired at
//! configuration and released when the bridge is dropped, on every exit
//! path including configuration failure.

use crate::state::{AxisState, ControlMode, JointState};
use odrive_common::config::{InterfaceKind, JointConfig, JointSpec, configure_joints};
use odrive_common::error::BridgeError;
use odrive_common::registers::{Register, RegisterLayout};
use odrive_common::transport::RegisterTransport;
use odrive_common::units::{current_to_torque, rad_to_turns, torque_to_current, turns_to_rad};
use tracing::{debug, info};

/// One configured joint: immutable configuration plus runtime state.
#[derive(Debug)]
pub struct Joint {
    /// Static configuration (name, axis index, motor constant).
    pub config: JointConfig,
    /// Runtime state, mutated by the cyclic I/O engine.
    pub state: JointState,
}

/// Actuator bridge mapping joints onto register-level device I/O.
pub struct OdriveBridge {
    /// Configured joints, in declaration order.
    joints: Vec<Joint>,
    /// Register lookup table.
    layout: RegisterLayout,
    /// Register transport, exclusively owned for the bridge's lifetime.
    transport: Box<dyn RegisterTransport>,
    /// Process-wide requested device state, sent to every axis.
    requested_state: AxisState,
}

impl OdriveBridge {
    /// Configure the bridge: validate joint specs and bring up the transport.
    ///
    /// All-or-nothing: any validation failure or transport initialization
    /// failure aborts configuration; the transport is dropped (released) on
    /// every error path.
    ///
    /// # Errors
    /// - [`BridgeError::Config`] for any violated joint check
    /// - [`BridgeError::TransportInit`] if the transport fails to initialize
    pub fn new(
        mut transport: Box<dyn RegisterTransport>,
        layout: RegisterLayout,
        specs: &[JointSpec],
    ) -> Result<Self, BridgeError> {
        let configs = configure_joints(specs)?;

        transport.initialize().map_err(BridgeError::TransportInit)?;

        let joints = configs
            .into_iter()
            .map(|config| Joint {
                config,
                state: JointState::default(),
            })
            .collect::<Vec<_>>();

        info!("Bridge configured with {} joints", joints.len());
        Ok(Self {
            joints,
            layout,
            transport,
            requested_state: AxisState::Idle,
        })
    }

    // ─── Axis lifecycle ─────────────────────────────────────────────

    /// Request closed-loop control on every configured axis.
    ///
    /// Writes the requested-state register of each axis in declaration
    /// order. The first write failure aborts the remaining writes; axes
    /// already written keep their state (no rollback).
    pub fn start(&mut self) -> Result<(), BridgeError> {
        self.request_axis_state(AxisState::ClosedLoopControl)?;
        info!("Bridge started: all axes requested closed-loop control");
        Ok(())
    }

    /// Request idle on every configured axis.
    ///
    /// Same all-axes-or-fail semantics as [`start`](Self::start). Callers
    /// are expected to retry `stop()` as a safety action after a partial
    /// failure.
    pub fn stop(&mut self) -> Result<(), BridgeError> {
        self.request_axis_state(AxisState::Idle)?;
        info!("Bridge stopped: all axes requested idle");
        Ok(())
    }

    fn request_axis_state(&mut self, state: AxisState) -> Result<(), BridgeError> {
        self.requested_state = state;
        let value = state.register_value();

        for joint in &self.joints {
            let axis = joint.config.axis;
            let address = self.layout.address(Register::RequestedState, axis);
            self.transport
                .write_register(address, value)
                .map_err(|e| BridgeError::write_failed(&joint.config.name, axis, address, e))?;
            debug!(
                "Axis {} ({}): requested state {:?}",
                axis, joint.config.name, state
            );
        }
        Ok(())
    }

    /// Currently requested device state.
    pub fn requested_state(&self) -> AxisState {
        self.requested_state
    }

    // ─── Cyclic I/O ─────────────────────────────────────────────────

    /// Read pass: refresh every joint's measured values from the device.
    ///
    /// Per joint, three register reads in order: measured current (→
    /// effort), velocity estimate (→ rad/s), position estimate (→ rad).
    /// The first failed read aborts the whole pass; values updated so far
    /// stay, the rest keep their previous (stale but uncorrupted) values.
    pub fn read(&mut self) -> Result<(), BridgeError> {
        for joint in &mut self.joints {
            let axis = joint.config.axis;
            let kv = joint.config.kv;
            let name = &joint.config.name;

            let address = self.layout.address(Register::CurrentMeasured, axis);
            let current = self
                .transport
                .read_register(address)
                .map_err(|e| BridgeError::read_failed(name, axis, address, e))?;
            joint.state.measured_effort = current_to_torque(f64::from(current), kv);

            let address = self.layout.address(Register::VelocityEstimate, axis);
            let velocity = self
                .transport
                .read_register(address)
                .map_err(|e| BridgeError::read_failed(name, axis, address, e))?;
            joint.state.measured_velocity = turns_to_rad(f64::from(velocity));

            let address = self.layout.address(Register::PositionEstimate, axis);
            let position = self
                .transport
                .read_register(address)
                .map_err(|e| BridgeError::read_failed(name, axis, address, e))?;
            joint.state.measured_position = turns_to_rad(f64::from(position));
        }
        Ok(())
    }

    /// Write pass: push each claimed joint's command to its setpoint
    /// register.
    ///
    /// Exactly one register write per claimed joint, selected by its
    /// control mode. Joints with no active consumer (`Undefined`) are
    /// skipped; later joints are still written. The first failed write
    /// aborts the pass.
    pub fn write(&mut self) -> Result<(), BridgeError> {
        for joint in &self.joints {
            let axis = joint.config.axis;
            let kv = joint.config.kv;
            let name = &joint.config.name;

            let (register, value) = match joint.state.control_mode {
                ControlMode::Undefined => {
                    debug!("Joint '{}' unclaimed, skipping write", name);
                    continue;
                }
                ControlMode::Effort => (
                    Register::CurrentSetpoint,
                    torque_to_current(joint.state.commanded_effort, kv),
                ),
                ControlMode::Velocity => (
                    Register::VelocitySetpoint,
                    rad_to_turns(joint.state.commanded_velocity),
                ),
                ControlMode::Position => (
                    Register::PositionSetpoint,
                    rad_to_turns(joint.state.commanded_position),
                ),
            };

            let address = self.layout.address(register, axis);
            self.transport
                .write_register(address, value as f32)
                .map_err(|e| BridgeError::write_failed(name, axis, address, e))?;
        }
        Ok(())
    }

    // ─── Interface surface (keyed by joint name) ────────────────────

    /// Claim a joint for the given command stream.
    ///
    /// The bridge never chooses a mode itself; only external consumers do.
    pub fn claim(&mut self, joint: &str, mode: ControlMode) -> Result<(), BridgeError> {
        let joint = self.joint_mut(joint)?;
        joint.state.control_mode = mode;
        info!(
            "Joint '{}' claimed in {:?} mode",
            joint.config.name, mode
        );
        Ok(())
    }

    /// Set a commanded value on a joint's command interface.
    pub fn set_command(
        &mut self,
        joint: &str,
        kind: InterfaceKind,
        value: f64,
    ) -> Result<(), BridgeError> {
        let joint = self.joint_mut(joint)?;
        match kind {
            InterfaceKind::Position => joint.state.commanded_position = value,
            InterfaceKind::Velocity => joint.state.commanded_velocity = value,
            InterfaceKind::Effort => joint.state.commanded_effort = value,
        }
        Ok(())
    }

    /// Read a joint's measured state interface.
    ///
    /// Returns NaN until the first successful read pass.
    pub fn measured(&self, joint: &str, kind: InterfaceKind) -> Result<f64, BridgeError> {
        let joint = self.joint(joint)?;
        Ok(match kind {
            InterfaceKind::Position => joint.state.measured_position,
            InterfaceKind::Velocity => joint.state.measured_velocity,
            InterfaceKind::Effort => joint.state.measured_effort,
        })
    }

    /// All configured joints, in declaration order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    fn joint(&self, name: &str) -> Result<&Joint, BridgeError> {
        self.joints
            .iter()
            .find(|j| j.config.name == name)
            .ok_or_else(|| BridgeError::UnknownJoint(name.to_string()))
    }

    fn joint_mut(&mut self, name: &str) -> Result<&mut Joint, BridgeError> {
        self.joints
            .iter_mut()
            .find(|j| j.config.name == name)
            .ok_or_else(|| BridgeError::UnknownJoint(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackTransport;
    use std::collections::HashMap;

    fn spec(name: &str, axis: u8, kv: f64) -> JointSpec {
        let ifaces = || {
            vec![
                "position".to_string(),
                "velocity".to_string(),
                "effort".to_string(),
            ]
        };
        let mut parameters = HashMap::new();
        parameters.insert("axis".to_string(), axis.to_string());
        parameters.insert("KV".to_string(), kv.to_string());
        JointSpec {
            name: name.to_string(),
            command_interfaces: ifaces(),
            state_interfaces: ifaces(),
            parameters,
        }
    }

    fn test_bridge() -> OdriveBridge {
        OdriveBridge::new(
            Box::new(LoopbackTransport::new()),
            RegisterLayout::default(),
            &[spec("j0", 0, 100.0), spec("j1", 1, 150.0)],
        )
        .expect("bridge should configure")
    }

    #[test]
    fn measured_is_nan_before_first_read() {
        let bridge = test_bridge();
        assert!(
            bridge
                .measured("j0", InterfaceKind::Position)
                .unwrap()
                .is_nan()
        );
        assert!(!bridge.joints()[0].state.has_feedback());
    }

    #[test]
    fn read_populates_feedback() {
        let mut bridge = test_bridge();
        bridge.read().unwrap();
        assert!(bridge.joints()[0].state.has_feedback());
        // Loopback registers default to zero.
        assert_eq!(bridge.measured("j1", InterfaceKind::Velocity).unwrap(), 0.0);
    }

    #[test]
    fn claim_unknown_joint_fails() {
        let mut bridge = test_bridge();
        let err = bridge.claim("elbow", ControlMode::Velocity).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownJoint(_)));
    }

    #[test]
    fn start_and_stop_track_requested_state() {
        let mut bridge = test_bridge();
        assert_eq!(bridge.requested_state(), AxisState::Idle);
        bridge.start().unwrap();
        assert_eq!(bridge.requested_state(), AxisState::ClosedLoopControl);
        bridge.stop().unwrap();
        assert_eq!(bridge.requested_state(), AxisState::Idle);
    }

    #[test]
    fn unclaimed_joints_write_nothing() {
        let mut bridge = test_bridge();
        // No claim: the pass succeeds and touches no setpoint register.
        bridge.set_command("j0", InterfaceKind::Velocity, 1.0).unwrap();
        bridge.write().unwrap();
    }

    #[test]
    fn configure_rejects_bad_specs() {
        let mut bad = spec("j0", 0, 100.0);
        bad.command_interfaces.clear();
        let result = OdriveBridge::new(
            Box::new(LoopbackTransport::new()),
            RegisterLayout::default(),
            &[bad],
        );
        assert!(matches!(result, Err(BridgeError::Config(_))));
    }
}
