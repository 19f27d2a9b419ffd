//! # Spur Gear Formulas
//!
//! Geometry and ratio formulas for involute spur gears on the metric module
//! system, plus the basic planetary (epicyclic) relations.
//!
//! ## Notation
//!
//! - `m` = Module (mm)
//! - `z` = Tooth count (`z1` driver, `z2` driven)
//! - `d` = Pitch diameter (mm)
//! - `a` = Centre distance (mm)
//! - `S`, `P`, `R` = Sun, planet and ring tooth counts
//!
//! ## Conventions
//!
//! - Ratios are speed reductions: input speed / output speed
//! - Ratio magnitudes are always positive; rotation direction is tracked
//!   separately by the gear-train composer
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Chapter 13
//! - ISO 54: Cylindrical gears - Modules

use std::f64::consts::PI;

use crate::units::{STANDARD_ADDENDUM_COEFFICIENT, STANDARD_DEDENDUM_COEFFICIENT};

// =============================================================================
// SINGLE MESH
// =============================================================================

/// Gear ratio of a single mesh
///
/// # Formula
/// i = z2 / z1
///
/// # Arguments
/// * `teeth_driver` - Teeth on the driving gear
/// * `teeth_driven` - Teeth on the driven gear
///
/// # Example
/// ```rust
/// use mech_core::equations::gear::gear_ratio;
///
/// assert!((gear_ratio(20, 60) - 3.0).abs() < 1e-12);
/// ```
#[inline]
pub fn gear_ratio(teeth_driver: u32, teeth_driven: u32) -> f64 {
    f64::from(teeth_driven) / f64::from(teeth_driver)
}

/// Pitch diameter d = m · z
#[inline]
pub fn pitch_diameter(module_mm: f64, teeth: u32) -> f64 {
    module_mm * f64::from(teeth)
}

/// Centre distance for an external mesh
///
/// ```text
///      ┌───┐          ┌───────┐
///      │z1 │──────────│  z2   │
///      └───┘          └───────┘
///        ←──── a ────→
/// ```
///
/// # Formula
/// a = m (z1 + z2) / 2
#[inline]
pub fn center_distance(module_mm: f64, teeth_driver: u32, teeth_driven: u32) -> f64 {
    module_mm * f64::from(teeth_driver + teeth_driven) / 2.0
}

/// Centre distance for an internal (pinion inside ring) mesh
///
/// # Formula
/// a = m (z_ring - z_pinion) / 2
///
/// Callers must ensure the ring has more teeth than the pinion.
#[inline]
pub fn internal_center_distance(module_mm: f64, teeth_pinion: u32, teeth_ring: u32) -> f64 {
    module_mm * (f64::from(teeth_ring) - f64::from(teeth_pinion)) / 2.0
}

/// Addendum h_a = 1.0 · m (standard full-depth tooth)
#[inline]
pub fn addendum(module_mm: f64) -> f64 {
    STANDARD_ADDENDUM_COEFFICIENT * module_mm
}

/// Dedendum h_f = 1.25 · m (standard full-depth tooth)
#[inline]
pub fn dedendum(module_mm: f64) -> f64 {
    STANDARD_DEDENDUM_COEFFICIENT * module_mm
}

/// Outside (tip) diameter of an external gear
///
/// # Formula
/// d_a = m (z + 2)
#[inline]
pub fn outside_diameter(module_mm: f64, teeth: u32) -> f64 {
    pitch_diameter(module_mm, teeth) + 2.0 * addendum(module_mm)
}

/// Circular pitch p = π · m
#[inline]
pub fn circular_pitch(module_mm: f64) -> f64 {
    PI * module_mm
}

// =============================================================================
// PLANETARY (EPICYCLIC) RELATIONS
// Derived from the Willis equation (n_s - n_c) / (n_r - n_c) = -R / S
// =============================================================================

/// Ring tooth count for a standard (coaxial, unmodified) planetary set
///
/// # Formula
/// R = S + 2P
#[inline]
pub fn ring_teeth_for(sun_teeth: u32, planet_teeth: u32) -> u32 {
    sun_teeth + 2 * planet_teeth
}

/// Ratio sun → carrier with the ring held fixed
///
/// # Formula
/// i = 1 + R / S
///
/// Carrier turns in the same direction as the sun.
#[inline]
pub fn planetary_ratio_ring_fixed(sun_teeth: u32, ring_teeth: u32) -> f64 {
    1.0 + f64::from(ring_teeth) / f64::from(sun_teeth)
}

/// Ratio carrier → ring with the sun held fixed
///
/// # Formula
/// i = R / (R + S)
///
/// This is an overdrive (i < 1): the ring turns faster than the carrier, in
/// the same direction.
#[inline]
pub fn planetary_ratio_sun_fixed(sun_teeth: u32, ring_teeth: u32) -> f64 {
    let r = f64::from(ring_teeth);
    r / (r + f64::from(sun_teeth))
}

/// Ratio sun → ring with the carrier held fixed (star arrangement)
///
/// # Formula
/// |i| = R / S, ring counter-rotates relative to the sun
#[inline]
pub fn planetary_ratio_carrier_fixed(sun_teeth: u32, ring_teeth: u32) -> f64 {
    f64::from(ring_teeth) / f64::from(sun_teeth)
}

// =============================================================================
// SPEED AND TORQUE
// =============================================================================

/// Output speed of a reduction: n_out = n_in / i
#[inline]
pub fn output_speed(input_rpm: f64, ratio: f64) -> f64 {
    input_rpm / ratio
}

/// Output torque of a reduction: T_out = T_in · i · η
#[inline]
pub fn output_torque(input_torque: f64, ratio: f64, efficiency: f64) -> f64 {
    input_torque * ratio * efficiency
}
