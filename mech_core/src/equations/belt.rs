//! # Belt Drive Formulas
//!
//! Open flat/V-belt drives between two pulleys. Slip and belt thickness are
//! ignored (pitch diameters are used throughout).
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Section 17-2

use std::f64::consts::PI;

use crate::units::MM_TO_M;

/// Speed ratio of a belt drive: i = D_driven / D_driver
///
/// # Example
/// ```rust
/// use mech_core::equations::belt::belt_ratio;
///
/// assert!((belt_ratio(100.0, 250.0) - 2.5).abs() < 1e-12);
/// ```
#[inline]
pub fn belt_ratio(driver_diameter: f64, driven_diameter: f64) -> f64 {
    driven_diameter / driver_diameter
}

/// Pitch length of an open belt
///
/// # Formula
/// L = 2C + π(D + d)/2 + (D - d)² / (4C)
///
/// # Arguments
/// * `large_diameter` - D, larger pulley pitch diameter
/// * `small_diameter` - d, smaller pulley pitch diameter
/// * `center_distance` - C, shaft centre distance (same unit)
#[inline]
pub fn open_belt_length(large_diameter: f64, small_diameter: f64, center_distance: f64) -> f64 {
    let diff = large_diameter - small_diameter;
    2.0 * center_distance
        + PI * (large_diameter + small_diameter) / 2.0
        + diff * diff / (4.0 * center_distance)
}

/// Belt linear speed in m/s from pulley pitch diameter (mm) and speed (rpm)
///
/// # Formula
/// v = π d n / 60
#[inline]
pub fn belt_speed(pulley_diameter_mm: f64, rpm: f64) -> f64 {
    PI * pulley_diameter_mm * MM_TO_M * rpm / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_belt_length() {
        // D = 300, d = 100, C = 500
        // L = 1000 + π*200 + 200²/2000 = 1000 + 628.3185 + 20
        let length = open_belt_length(300.0, 100.0, 500.0);
        assert!((length - 1648.3185).abs() < 1e-3);
    }

    #[test]
    fn test_equal_pulleys() {
        let length = open_belt_length(100.0, 100.0, 400.0);
        assert!((length - (800.0 + PI * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_belt_speed() {
        // 200 mm pulley at 1500 rpm: π * 0.2 * 25 = 15.708 m/s
        assert!((belt_speed(200.0, 1500.0) - 15.70796).abs() < 1e-4);
    }
}
