//! # Roller Chain Formulas
//!
//! Sprocket geometry and chain length for standard roller chain drives.
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Section 17-5
//! - ANSI B29.1 / ISO 606

use std::f64::consts::PI;

use crate::units::MM_TO_M;

/// Sprocket pitch diameter
///
/// # Formula
/// D = p / sin(180° / N)
///
/// # Arguments
/// * `pitch` - Chain pitch
/// * `teeth` - Sprocket tooth count N
#[inline]
pub fn sprocket_pitch_diameter(pitch: f64, teeth: u32) -> f64 {
    pitch / (PI / f64::from(teeth)).sin()
}

/// Mean chain speed in m/s
///
/// # Formula
/// v = N p n / 60   (p in metres)
#[inline]
pub fn chain_speed(pitch_mm: f64, teeth: u32, rpm: f64) -> f64 {
    f64::from(teeth) * pitch_mm * MM_TO_M * rpm / 60.0
}

/// Chain length in pitches for an open two-sprocket drive
///
/// # Formula
/// L/p = 2C/p + (N1 + N2)/2 + (N2 - N1)² / (4π² C/p)
///
/// The result is fractional; round up to an even number of links when
/// ordering chain.
#[inline]
pub fn chain_length_pitches(pitch: f64, teeth_small: u32, teeth_large: u32, center_distance: f64) -> f64 {
    let n1 = f64::from(teeth_small);
    let n2 = f64::from(teeth_large);
    let c_over_p = center_distance / pitch;
    2.0 * c_over_p + (n1 + n2) / 2.0 + (n2 - n1).powi(2) / (4.0 * PI * PI * c_over_p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprocket_pitch_diameter() {
        // 12.7 mm pitch, 17 teeth: 12.7 / sin(10.588°) = 69.12 mm
        let d = sprocket_pitch_diameter(12.7, 17);
        assert!((d - 69.12).abs() < 0.01);
    }

    #[test]
    fn test_chain_speed() {
        // 17 teeth, 12.7 mm, 1000 rpm: 17 * 0.0127 * 1000 / 60 = 3.598 m/s
        assert!((chain_speed(12.7, 17, 1000.0) - 3.5983).abs() < 1e-3);
    }

    #[test]
    fn test_chain_length() {
        // Shigley Ex. 17-? style: p = 1, N1 = 17, N2 = 34, C = 40
        // L/p = 80 + 25.5 + 289 / (4π² * 40) = 105.683
        let length = chain_length_pitches(1.0, 17, 34, 40.0);
        assert!((length - 105.683).abs() < 1e-3);
    }
}
