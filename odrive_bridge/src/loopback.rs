//! In-memory register transport for simulation and tests.
//!
//! `LoopbackTransport` stands in for real hardware: a flat register bank
//! where unwritten registers read as zero. With an optional echo layout it
//! mirrors setpoint writes into the matching estimate registers, so a
//! closed demo loop shows the commanded motion in the next read pass.

use odrive_common::registers::RegisterLayout;
use odrive_common::transport::{RegisterTransport, TransportError};
use std::collections::HashMap;
use tracing::debug;

/// Software register bank implementing [`RegisterTransport`].
pub struct LoopbackTransport {
    /// Register bank; absent addresses read as 0.0.
    registers: HashMap<u32, f32>,
    /// Set by `initialize()`; reads/writes before that fail.
    initialized: bool,
    /// When set, setpoint writes are echoed into estimate registers.
    echo_layout: Option<RegisterLayout>,
}

impl LoopbackTransport {
    /// Create an empty register bank with no echo behavior.
    pub fn new() -> Self {
        Self {
            registers: HashMap::new(),
            initialized: false,
            echo_layout: None,
        }
    }

    /// Create a register bank that echoes setpoints into estimates using
    /// the given layout.
    pub fn with_echo(layout: RegisterLayout) -> Self {
        Self {
            registers: HashMap::new(),
            initialized: false,
            echo_layout: Some(layout),
        }
    }

    /// Preload a register value, e.g. simulated sensor feedback.
    pub fn preload(&mut self, address: u32, value: f32) {
        self.registers.insert(address, value);
    }

    /// Value last written to `address`, if any.
    pub fn written(&self, address: u32) -> Option<f32> {
        self.registers.get(&address).copied()
    }

    /// Mirror a setpoint write into the matching estimate register.
    fn echo(&mut self, address: u32, value: f32) {
        let Some(layout) = &self.echo_layout else {
            return;
        };
        let stride = layout.per_axis_stride;
        let pairs = [
            (layout.current_setpoint, layout.current_measured),
            (layout.velocity_setpoint, layout.velocity_estimate),
            (layout.position_setpoint, layout.position_estimate),
        ];
        for (setpoint_base, estimate_base) in pairs {
            if address >= setpoint_base && (address - setpoint_base) % stride == 0 {
                let axis_offset = address - setpoint_base;
                self.registers.insert(estimate_base + axis_offset, value);
                return;
            }
        }
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterTransport for LoopbackTransport {
    fn initialize(&mut self) -> Result<(), TransportError> {
        self.initialized = true;
        debug!("Loopback transport initialized");
        Ok(())
    }

    fn read_register(&mut self, address: u32) -> Result<f32, TransportError> {
        if !self.initialized {
            return Err(TransportError::NotInitialized);
        }
        Ok(self.registers.get(&address).copied().unwrap_or(0.0))
    }

    fn write_register(&mut self, address: u32, value: f32) -> Result<(), TransportError> {
        if !self.initialized {
            return Err(TransportError::NotInitialized);
        }
        self.registers.insert(address, value);
        self.echo(address, value);
        Ok(())
    }
}
