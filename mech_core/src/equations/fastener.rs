//! # Threaded Fastener Formulas
//!
//! ISO metric coarse/fine threads.
//!
//! ## References
//!
//! - ISO 898-1: Mechanical properties of fasteners
//! - Shigley's Mechanical Engineering Design, 10th Edition, Sections 8-2, 8-8

use std::f64::consts::PI;

/// Tensile stress area of a metric thread
///
/// # Formula
/// A_t = (π/4) (d - 0.9382 P)²
///
/// # Example
/// ```rust
/// use mech_core::equations::fastener::tensile_stress_area;
///
/// // M10 x 1.5 coarse: 58.0 mm²
/// assert!((tensile_stress_area(10.0, 1.5) - 58.0).abs() < 0.05);
/// ```
#[inline]
pub fn tensile_stress_area(nominal_diameter_mm: f64, pitch_mm: f64) -> f64 {
    let d = nominal_diameter_mm - 0.9382 * pitch_mm;
    PI / 4.0 * d * d
}

/// Tightening torque for a target preload
///
/// # Formula
/// T = K F d   (K ≈ 0.2 for unlubricated steel)
///
/// # Returns
/// Torque in N·mm when F is in N and d in mm
#[inline]
pub fn preload_torque(torque_coefficient: f64, preload_n: f64, nominal_diameter_mm: f64) -> f64 {
    torque_coefficient * preload_n * nominal_diameter_mm
}

/// Tensile stress in the bolt, σ = F / A_t (MPa)
#[inline]
pub fn bolt_tensile_stress(force_n: f64, tensile_stress_area_mm2: f64) -> f64 {
    force_n / tensile_stress_area_mm2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_torque() {
        // K = 0.2, F = 20 kN, M10: 40_000 N·mm = 40 N·m
        assert!((preload_torque(0.2, 20_000.0, 10.0) - 40_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bolt_stress() {
        let area = tensile_stress_area(10.0, 1.5);
        assert!((bolt_tensile_stress(area * 400.0, area) - 400.0).abs() < 1e-9);
    }
}
