//! # Unit Conventions
//!
//! Machina works in SI units with the conventions used on mechanical drawings:
//! - Length: millimetres (mm) for gear and fastener geometry, metres (m) for speeds
//! - Force: newtons (N), kilonewtons (kN) for bearing catalogue ratings
//! - Torque: newton-metres (N·m)
//! - Stress: megapascals (MPa = N/mm²)
//! - Rotational speed: revolutions per minute (rpm), radians per second (rad/s)
//! - Angle: degrees for reporting, radians for trigonometry
//! - Power: watts (W), kilowatts (kW)
//!
//! Quantities are plain `f64` values whose field names carry the unit
//! (`module_mm`, `radial_force_n`, `speed_rpm`). Conversion factors are named
//! `const`s, never settable globals.
//!
//! ```rust
//! use mech_core::units::{MM_TO_M, RPM_TO_RAD_PER_S};
//!
//! assert!((120.0 * MM_TO_M - 0.12).abs() < 1e-12);
//! assert!((60.0 * RPM_TO_RAD_PER_S - std::f64::consts::TAU).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

/// Millimetres to metres
pub const MM_TO_M: f64 = 1.0e-3;

/// Metres to millimetres
pub const M_TO_MM: f64 = 1.0e3;

/// Kilonewtons to newtons
pub const KN_TO_N: f64 = 1.0e3;

/// Kilowatts to watts
pub const KW_TO_W: f64 = 1.0e3;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Revolutions per minute to radians per second (2π/60)
pub const RPM_TO_RAD_PER_S: f64 = 2.0 * PI / 60.0;

/// Minutes per hour, used to turn rpm into revolutions per hour
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Bearing ratings are quoted per million revolutions
pub const MILLION_REVOLUTIONS: f64 = 1.0e6;

/// Standard full-depth addendum coefficient (addendum = 1.0 · m)
pub const STANDARD_ADDENDUM_COEFFICIENT: f64 = 1.0;

/// Standard full-depth dedendum coefficient (dedendum = 1.25 · m)
pub const STANDARD_DEDENDUM_COEFFICIENT: f64 = 1.25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_factors_invert() {
        assert!((250.0 * MM_TO_M * M_TO_MM - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_factors_invert() {
        assert!((180.0 * DEG_TO_RAD - PI).abs() < 1e-12);
        assert!((PI * RAD_TO_DEG - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_rpm_to_rad_per_s() {
        assert!((1500.0 * RPM_TO_RAD_PER_S - 157.0796).abs() < 1e-3);
    }

    #[test]
    fn test_force_and_power_prefixes() {
        assert_eq!(12.5 * KN_TO_N, 12_500.0);
        assert_eq!(7.5 * KW_TO_W, 7_500.0);
    }
}
