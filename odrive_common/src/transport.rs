//! Register transport trait and transport errors.
//!
//! The bridge talks to the motor controller through this seam only:
//! addressed reads and writes of single register values. Connection
//! establishment and byte transfer live behind the trait (USB in
//! production, an in-memory bank in simulation and tests).

use thiserror::Error;

/// Error reported by a transport call, wrapping the native code/name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// `initialize()` was not called or did not succeed.
    #[error("transport not initialized")]
    NotInitialized,

    /// Device-level failure with the transport's native error code.
    #[error("device error {code} ({name})")]
    Device {
        /// Native error code (e.g. a libusb error number).
        code: i32,
        /// Native error name.
        name: String,
    },

    /// Transfer-level failure (timeout, disconnect, short transfer).
    #[error("transfer failed: {0}")]
    Transfer(String),
}

/// Addressed register access against a multi-axis motor controller.
///
/// # Contract
///
/// - Each call is atomic from the bridge's point of view: a register is
///   read or written whole, or the call fails.
/// - Calls must not block indefinitely; implementations give hanging
///   transfers a bounded timeout.
/// - The bridge owns the transport exclusively for its whole lifetime and
///   drives it from a single control thread.
pub trait RegisterTransport: Send {
    /// One-time transport bring-up, called once during bridge configuration.
    ///
    /// # Errors
    /// Failure is fatal to configuration; the bridge is never constructed.
    fn initialize(&mut self) -> Result<(), TransportError>;

    /// Read the register at `address`.
    fn read_register(&mut self, address: u32) -> Result<f32, TransportError>;

    /// Write `value` to the register at `address`.
    fn write_register(&mut self, address: u32, value: f32) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_error_display_includes_code_and_name() {
        let err = TransportError::Device {
            code: -7,
            name: "LIBUSB_ERROR_TIMEOUT".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("-7"));
        assert!(msg.contains("LIBUSB_ERROR_TIMEOUT"));
    }

    #[test]
    fn not_initialized_display() {
        assert_eq!(
            TransportError::NotInitialized.to_string(),
            "transport not initialized"
        );
    }
}
