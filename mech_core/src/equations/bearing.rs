//! # Rolling Bearing Life Formulas
//!
//! Raw ISO 281 basic rating life relations. These functions do not validate
//! their inputs; the checked versions live in
//! [`crate::calculations::bearing`].
//!
//! ## Notation
//!
//! - `Fr`, `Fa` = Radial and axial load (N)
//! - `X`, `Y` = Radial and axial load factors
//! - `P` = Equivalent dynamic load (N)
//! - `C` = Basic dynamic load rating (N)
//! - `p` = Life exponent (3 for ball, 10/3 for roller bearings)
//! - `L10` = Basic rating life (revolutions)
//!
//! ## References
//!
//! - ISO 281:2007 Rolling bearings - Dynamic load ratings and rating life
//! - Shigley's Mechanical Engineering Design, 10th Edition, Chapter 11

use crate::units::{MILLION_REVOLUTIONS, MINUTES_PER_HOUR};

/// Life exponent for ball bearings
pub const BALL_LIFE_EXPONENT: f64 = 3.0;

/// Life exponent for roller bearings
pub const ROLLER_LIFE_EXPONENT: f64 = 10.0 / 3.0;

/// Equivalent dynamic load P = X·Fr + Y·Fa
#[inline]
pub fn equivalent_dynamic_load(x: f64, radial_force: f64, y: f64, axial_force: f64) -> f64 {
    x * radial_force + y * axial_force
}

/// Basic rating life in revolutions
///
/// # Formula
/// L10 = (C / P)^p · 10⁶
#[inline]
pub fn basic_rating_life(dynamic_capacity: f64, equivalent_load: f64, exponent: f64) -> f64 {
    (dynamic_capacity / equivalent_load).powf(exponent) * MILLION_REVOLUTIONS
}

/// Rating life in operating hours
///
/// # Formula
/// L10h = L10 / (60 · n)
#[inline]
pub fn rating_life_hours(life_revolutions: f64, rpm: f64) -> f64 {
    life_revolutions / (MINUTES_PER_HOUR * rpm)
}

/// Dynamic capacity needed to reach a target life
///
/// # Formula
/// C_req = P · (L / 10⁶)^(1/p)
#[inline]
pub fn required_dynamic_capacity(equivalent_load: f64, life_revolutions: f64, exponent: f64) -> f64 {
    equivalent_load * (life_revolutions / MILLION_REVOLUTIONS).powf(1.0 / exponent)
}

/// Static safety factor s0 = C0 / P0
#[inline]
pub fn static_safety_factor(static_capacity: f64, static_equivalent_load: f64) -> f64 {
    static_capacity / static_equivalent_load
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_life() {
        let l10 = basic_rating_life(10_000.0, 5_000.0, BALL_LIFE_EXPONENT);
        assert!((l10 - 8.0e6).abs() < 1e-3);
    }

    #[test]
    fn test_required_capacity_inverts_life() {
        let l10 = basic_rating_life(25_500.0, 3_200.0, ROLLER_LIFE_EXPONENT);
        let c = required_dynamic_capacity(3_200.0, l10, ROLLER_LIFE_EXPONENT);
        assert!((c - 25_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_hours() {
        assert!((rating_life_hours(9.0e6, 1500.0) - 100.0).abs() < 1e-9);
    }
}
