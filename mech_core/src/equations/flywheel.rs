//! # Flywheel Formulas
//!
//! Energy storage and speed fluctuation for rotating flywheels.
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Section 16-12

/// Kinetic energy E = ½ I ω² (J, with I in kg·m² and ω in rad/s)
#[inline]
pub fn kinetic_energy(moment_of_inertia: f64, omega: f64) -> f64 {
    0.5 * moment_of_inertia * omega * omega
}

/// Coefficient of speed fluctuation
///
/// # Formula
/// Cs = (ω_max - ω_min) / ω_avg,  ω_avg = (ω_max + ω_min) / 2
#[inline]
pub fn coefficient_of_fluctuation(omega_max: f64, omega_min: f64) -> f64 {
    (omega_max - omega_min) / ((omega_max + omega_min) / 2.0)
}

/// Energy released between two speeds: ΔE = ½ I (ω_max² - ω_min²)
#[inline]
pub fn energy_fluctuation(moment_of_inertia: f64, omega_max: f64, omega_min: f64) -> f64 {
    0.5 * moment_of_inertia * (omega_max * omega_max - omega_min * omega_min)
}

/// Flywheel inertia needed to hold speed fluctuation to Cs
///
/// # Formula
/// I = ΔE / (Cs ω_avg²)
#[inline]
pub fn required_moment_of_inertia(energy_change: f64, coefficient: f64, omega_avg: f64) -> f64 {
    energy_change / (coefficient * omega_avg * omega_avg)
}
