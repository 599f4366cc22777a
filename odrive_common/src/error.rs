//! Bridge error types.

use crate::transport::TransportError;
use thiserror::Error;

/// Error types for bridge operations.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// Configuration error (bad interface shape, missing/unparseable
    /// parameter, zero motor constant, duplicate axis).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failed to initialize during configuration.
    #[error("Transport initialization failed: {0}")]
    TransportInit(TransportError),

    /// A joint name that no configured joint matches.
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// A register read or write failed during start/stop/read/write.
    #[error("Register {access} failed for joint '{joint}' (axis {axis}, address {address}): {source}")]
    RegisterIo {
        /// Access direction, "read" or "write".
        access: &'static str,
        /// Name of the joint whose register access failed.
        joint: String,
        /// Axis index of that joint.
        axis: u8,
        /// Physical register address.
        address: u32,
        /// Underlying transport error.
        source: TransportError,
    },
}

impl BridgeError {
    /// Build a [`BridgeError::RegisterIo`] for a failed read.
    pub fn read_failed(joint: &str, axis: u8, address: u32, source: TransportError) -> Self {
        Self::RegisterIo {
            access: "read",
            joint: joint.to_string(),
            axis,
            address,
            source,
        }
    }

    /// Build a [`BridgeError::RegisterIo`] for a failed write.
    pub fn write_failed(joint: &str, axis: u8, address: u32, source: TransportError) -> Self {
        Self::RegisterIo {
            access: "write",
            joint: joint.to_string(),
            axis,
            address,
            source,
        }
    }
}
