//! # Helical Compression Spring Formulas
//!
//! ## Notation
//!
//! - `D` = Mean coil diameter (mm)
//! - `d` = Wire diameter (mm)
//! - `C` = Spring index D/d
//! - `Na` = Active coils
//! - `G` = Shear modulus (MPa)
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Sections 10-2 to 10-4

use std::f64::consts::PI;

/// Spring index C = D / d
#[inline]
pub fn spring_index(mean_diameter: f64, wire_diameter: f64) -> f64 {
    mean_diameter / wire_diameter
}

/// Wahl stress-correction factor
///
/// # Formula
/// K_w = (4C - 1)/(4C - 4) + 0.615/C
#[inline]
pub fn wahl_factor(spring_index: f64) -> f64 {
    (4.0 * spring_index - 1.0) / (4.0 * spring_index - 4.0) + 0.615 / spring_index
}

/// Spring rate
///
/// # Formula
/// k = G d⁴ / (8 D³ Na)
///
/// # Returns
/// Rate in N/mm when G is in MPa and lengths in mm
#[inline]
pub fn spring_rate(shear_modulus_mpa: f64, wire_diameter_mm: f64, mean_diameter_mm: f64, active_coils: f64) -> f64 {
    shear_modulus_mpa * wire_diameter_mm.powi(4) / (8.0 * mean_diameter_mm.powi(3) * active_coils)
}

/// Corrected shear stress in the wire
///
/// # Formula
/// τ = K_w · 8 F D / (π d³)
#[inline]
pub fn spring_shear_stress(force_n: f64, mean_diameter_mm: f64, wire_diameter_mm: f64) -> f64 {
    let c = spring_index(mean_diameter_mm, wire_diameter_mm);
    wahl_factor(c) * 8.0 * force_n * mean_diameter_mm / (PI * wire_diameter_mm.powi(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wahl_factor() {
        assert!((wahl_factor(6.0) - 1.2525).abs() < 1e-4);
    }

    #[test]
    fn test_spring_rate() {
        // G = 80 GPa, d = 4, D = 32, Na = 10 -> 7.8125 N/mm
        assert!((spring_rate(80_000.0, 4.0, 32.0, 10.0) - 7.8125).abs() < 1e-9);
    }
}
