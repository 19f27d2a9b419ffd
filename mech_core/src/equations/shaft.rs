//! # Shaft Formulas
//!
//! Power transmission and torsion of solid circular shafts.
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Sections 3-12, 7-4

use std::f64::consts::PI;

use crate::units::RPM_TO_RAD_PER_S;

/// Torque transmitted at a given power and speed
///
/// # Formula
/// T = P / ω,  ω = 2πn/60
///
/// # Arguments
/// * `power_w` - Power in watts
/// * `rpm` - Shaft speed
///
/// # Returns
/// Torque in N·m
///
/// # Example
/// ```rust
/// use mech_core::equations::shaft::torque_from_power;
///
/// // 15 kW at 1450 rpm
/// let t = torque_from_power(15_000.0, 1450.0);
/// assert!((t - 98.786).abs() < 1e-2);
/// ```
#[inline]
pub fn torque_from_power(power_w: f64, rpm: f64) -> f64 {
    power_w / (rpm * RPM_TO_RAD_PER_S)
}

/// Power transmitted by a torque at a given speed, P = T ω (W)
#[inline]
pub fn power_from_torque(torque_nm: f64, rpm: f64) -> f64 {
    torque_nm * rpm * RPM_TO_RAD_PER_S
}

/// Maximum torsional shear stress in a solid round shaft
///
/// # Formula
/// τ = 16 T / (π d³)
///
/// # Arguments
/// * `torque_nmm` - Torque in N·mm
/// * `diameter_mm` - Shaft diameter in mm
///
/// # Returns
/// Shear stress in MPa (N/mm²)
#[inline]
pub fn torsional_shear_stress(torque_nmm: f64, diameter_mm: f64) -> f64 {
    16.0 * torque_nmm / (PI * diameter_mm.powi(3))
}

/// Minimum solid shaft diameter for an allowable shear stress
///
/// # Formula
/// d = (16 T / (π τ_allow))^(1/3)
#[inline]
pub fn solid_shaft_diameter(torque_nmm: f64, allowable_shear_mpa: f64) -> f64 {
    (16.0 * torque_nmm / (PI * allowable_shear_mpa)).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torque_power_inverse() {
        let t = torque_from_power(7500.0, 960.0);
        assert!((power_from_torque(t, 960.0) - 7500.0).abs() < 1e-9);
    }

    #[test]
    fn test_torsional_stress() {
        // T = 100 N·m = 100_000 N·mm, d = 25 mm: τ = 1.6e6 / (π * 15625) = 32.595 MPa
        let tau = torsional_shear_stress(100_000.0, 25.0);
        assert!((tau - 32.595).abs() < 1e-3);
    }

    #[test]
    fn test_diameter_inverts_stress() {
        let d = solid_shaft_diameter(100_000.0, 32.594932);
        assert!((d - 25.0).abs() < 1e-4);
    }
}
