//! Unit conversions between joint-native SI units and device-native units.
//!
//! The device reports angles in motor turns and torque as phase current;
//! the framework works in radians and N·m. All functions here are pure and
//! stateless, invoked inline by the cyclic I/O engine on every register
//! access.
//!
//! ## Conversion Direction
//!
//! - **Reads**: device turns → radians, device current → torque.
//! - **Writes**: commanded radians → turns, commanded torque → current.

use crate::consts::TORQUE_CONSTANT;
use std::f64::consts::PI;

/// Convert motor turns (revolutions) to radians.
pub fn turns_to_rad(turns: f64) -> f64 {
    turns * 2.0 * PI
}

/// Convert radians to motor turns (revolutions).
pub fn rad_to_turns(rad: f64) -> f64 {
    rad / (2.0 * PI)
}

/// Convert measured phase current (A) to shaft torque (N·m).
///
/// `kv` is the joint's motor constant and must be non-zero; a zero KV is
/// rejected at configuration time before this is ever called.
pub fn current_to_torque(current: f64, kv: f64) -> f64 {
    current * TORQUE_CONSTANT / kv
}

/// Convert commanded shaft torque (N·m) to phase current (A).
///
/// Exact inverse of [`current_to_torque`] for the same `kv`.
pub fn torque_to_current(torque: f64, kv: f64) -> f64 {
    torque / TORQUE_CONSTANT * kv
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn turns_rad_roundtrip() {
        for v in [-10.0, -0.5, 0.0, 0.25, 1.0, 123.456] {
            let back = rad_to_turns(turns_to_rad(v));
            assert!((back - v).abs() < TOL, "roundtrip failed for {v}: {back}");
        }
    }

    #[test]
    fn torque_current_roundtrip() {
        for kv in [1.0, 100.0, 150.0, 270.0, -90.0] {
            for t in [-2.5, 0.0, 0.1, 1.0] {
                let back = current_to_torque(torque_to_current(t, kv), kv);
                assert!((back - t).abs() < TOL, "roundtrip failed for t={t} kv={kv}");
            }
        }
    }

    #[test]
    fn turns_to_rad_quarter_turn() {
        assert!((turns_to_rad(0.25) - std::f64::consts::FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn current_to_torque_reference_values() {
        // 1 A at KV=100 -> 0.0827 N·m
        assert!((current_to_torque(1.0, 100.0) - 0.0827).abs() < 1e-9);
        // 1 N·m at KV=150 -> ~18.14 A
        assert!((torque_to_current(1.0, 150.0) - 150.0 / 8.27).abs() < 1e-9);
    }
}
