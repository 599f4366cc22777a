//! # ODrive Actuator Bridge
//!
//! Real-time bridge between a generic motion-control framework and a
//! multi-axis ODrive-style motor controller reachable over a register
//! transport.
//!
//! # Module Structure
//!
//! - [`bridge`] - Bridge lifecycle and the cyclic I/O engine
//! - [`loopback`] - In-memory register transport for simulation and tests
//! - [`runner`] - Fixed-period cycle loop with timing statistics
//! - [`state`] - Per-joint runtime state and control modes
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     odrive_bridge                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────┐   │
//! │  │  framework  │◄──►│ OdriveBridge │◄──►│ RegisterLayout  │   │
//! │  │  (caller)   │    │ (cyclic I/O) │    │ (odrive_common) │   │
//! │  └─────────────┘    └──────┬───────┘    └─────────────────┘   │
//! │                            │                                  │
//! │                            ▼                                  │
//! │                  ┌───────────────────┐                        │
//! │                  │ RegisterTransport │ (trait object)         │
//! │                  └───────────────────┘                        │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod bridge;
pub mod loopback;
pub mod runner;
pub mod state;

// Re-export key types for convenience
pub use crate::bridge::{Joint, OdriveBridge};
pub use crate::loopback::LoopbackTransport;
pub use crate::runner::CycleRunner;
pub use crate::state::{AxisState, ControlMode, JointState};
