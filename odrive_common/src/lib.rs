//! ODrive Bridge Common Library
//!
//! Shared types for the ODrive actuator bridge workspace.
//!
//! # Module Structure
//!
//! - [`config`] - Joint specification, validation and bridge configuration
//! - [`consts`] - Register layout defaults and fixed motor constants
//! - [`error`] - Bridge error types
//! - [`registers`] - Register lookup table and address derivation
//! - [`transport`] - Register transport trait and transport errors
//! - [`units`] - Unit conversions between joint-native and device-native units

pub mod config;
pub mod consts;
pub mod error;
pub mod registers;
pub mod transport;
pub mod units;
