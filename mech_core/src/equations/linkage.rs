//! # Planar Four-Bar Linkage Formulas
//!
//! ```text
//!              B ─────── coupler (b) ─────── C
//!             /                               \
//!      crank (a)                            rocker (c)
//!           /  θ                                \
//!         O2 ──────────── ground (g) ──────────── O4
//! ```
//!
//! ## Notation
//!
//! - `g`, `a`, `b`, `c` = Ground, crank, coupler and rocker lengths
//! - `θ` = Crank angle measured from the ground line at O2
//! - `d` = Diagonal O4–B
//! - `μ` = Transmission angle, the angle between coupler and rocker at C
//!
//! ## References
//!
//! - Norton, Design of Machinery, 5th Edition, Sections 2.12 and 4.10
//! - Shigley & Uicker, Theory of Machines and Mechanisms, Section 1.10

/// Grashof condition: s + l ≤ p + q
///
/// # Arguments
/// * `shortest` - s
/// * `longest` - l
/// * `p`, `q` - The two intermediate lengths (order irrelevant)
#[inline]
pub fn grashof_condition(shortest: f64, longest: f64, p: f64, q: f64) -> bool {
    shortest + longest <= p + q
}

/// Diagonal O4–B by the law of cosines in triangle O2–B–O4
///
/// # Formula
/// d² = g² + a² - 2 g a cos θ
#[inline]
pub fn diagonal_length(ground: f64, crank: f64, crank_angle_rad: f64) -> f64 {
    (ground * ground + crank * crank - 2.0 * ground * crank * crank_angle_rad.cos()).sqrt()
}

/// Cosine of the transmission angle for a given diagonal
///
/// # Formula
/// cos μ = (b² + c² - d²) / (2 b c)
///
/// Values outside [-1, 1] mean the coupler and rocker cannot reach each
/// other at this diagonal.
#[inline]
pub fn transmission_angle_cos(coupler: f64, rocker: f64, diagonal: f64) -> f64 {
    (coupler * coupler + rocker * rocker - diagonal * diagonal) / (2.0 * coupler * rocker)
}

/// Transmission angle μ in radians at crank angle θ
///
/// The cosine is clamped to [-1, 1]; callers must confirm the loop closes
/// at this position before trusting the result.
#[inline]
pub fn transmission_angle(ground: f64, crank: f64, coupler: f64, rocker: f64, crank_angle_rad: f64) -> f64 {
    let d = diagonal_length(ground, crank, crank_angle_rad);
    transmission_angle_cos(coupler, rocker, d).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_grashof() {
        assert!(grashof_condition(2.0, 9.0, 7.0, 6.0));
        assert!(grashof_condition(2.0, 9.0, 6.0, 5.0)); // equality: change point
        assert!(!grashof_condition(2.0, 9.0, 5.0, 5.0));
    }

    #[test]
    fn test_diagonal_extremes() {
        assert!((diagonal_length(7.0, 2.0, 0.0) - 5.0).abs() < 1e-12);
        assert!((diagonal_length(7.0, 2.0, PI) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_linkage_right_angle() {
        // Unit-square parallelogram at θ = 90°: d = √2, μ = 90°
        let mu = transmission_angle(1.0, 1.0, 1.0, 1.0, FRAC_PI_2);
        assert!((mu - FRAC_PI_2).abs() < 1e-12);
    }
}
