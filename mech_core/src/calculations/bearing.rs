//! # Rolling Bearing Life
//!
//! Checked ISO 281 basic rating life: equivalent dynamic load, L10 life in
//! revolutions and in hours, plus a composite check against a required life.
//!
//! The three basic operations ([`equivalent_load`], [`life_revolutions`],
//! [`life_hours`]) are independently callable. [`calculate`] chains them for
//! a complete bearing check.
//!
//! ## Example
//!
//! ```rust
//! use mech_core::calculations::bearing::{calculate, BearingInput, BearingLoadCase};
//!
//! let input = BearingInput {
//!     label: "B-1".to_string(),
//!     load_case: BearingLoadCase::ball(3_000.0, 800.0, 0.56, 1.8, 25_500.0),
//!     speed_rpm: 1_450.0,
//!     required_life_hours: Some(10_000.0),
//!     static_capacity_n: Some(13_200.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.life_hours > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::bearing::{
    basic_rating_life, equivalent_dynamic_load, rating_life_hours, required_dynamic_capacity as capacity_for_life,
    static_safety_factor, BALL_LIFE_EXPONENT, ROLLER_LIFE_EXPONENT,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{MechError, MechResult};
use crate::units::MINUTES_PER_HOUR;
use crate::validation::{check_finite_output, NON_NEGATIVE, POSITIVE};

fn default_life_exponent() -> f64 {
    BALL_LIFE_EXPONENT
}

/// Loads, factors and rating for one bearing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "radial_force_n": 3000.0,
///   "axial_force_n": 800.0,
///   "x_factor": 0.56,
///   "y_factor": 1.8,
///   "dynamic_capacity_n": 25500.0,
///   "life_exponent": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingLoadCase {
    /// Radial force Fr (N)
    pub radial_force_n: f64,

    /// Axial force Fa (N)
    #[serde(default)]
    pub axial_force_n: f64,

    /// Radial load factor X
    pub x_factor: f64,

    /// Axial load factor Y
    #[serde(default)]
    pub y_factor: f64,

    /// Basic dynamic load rating C (N)
    pub dynamic_capacity_n: f64,

    /// Life exponent p: 3 for ball, 10/3 for roller bearings
    #[serde(default = "default_life_exponent")]
    pub life_exponent: f64,
}

impl BearingLoadCase {
    /// Ball bearing load case (p = 3)
    pub fn ball(radial_force_n: f64, axial_force_n: f64, x_factor: f64, y_factor: f64, dynamic_capacity_n: f64) -> Self {
        Self {
            radial_force_n,
            axial_force_n,
            x_factor,
            y_factor,
            dynamic_capacity_n,
            life_exponent: BALL_LIFE_EXPONENT,
        }
    }

    /// Roller bearing load case (p = 10/3)
    pub fn roller(radial_force_n: f64, axial_force_n: f64, x_factor: f64, y_factor: f64, dynamic_capacity_n: f64) -> Self {
        Self {
            life_exponent: ROLLER_LIFE_EXPONENT,
            ..Self::ball(radial_force_n, axial_force_n, x_factor, y_factor, dynamic_capacity_n)
        }
    }

    fn validate_loads(&self) -> MechResult<()> {
        NON_NEGATIVE.check("radial_force_n", self.radial_force_n).map_err(MechError::load)?;
        NON_NEGATIVE.check("axial_force_n", self.axial_force_n).map_err(MechError::load)?;
        NON_NEGATIVE.check("x_factor", self.x_factor).map_err(MechError::load)?;
        NON_NEGATIVE.check("y_factor", self.y_factor).map_err(MechError::load)?;
        Ok(())
    }

    /// Validate loads, factors, rating and exponent.
    pub fn validate(&self) -> MechResult<()> {
        self.validate_loads()?;
        POSITIVE
            .check("dynamic_capacity_n", self.dynamic_capacity_n)
            .map_err(MechError::load)?;
        POSITIVE
            .check("life_exponent", self.life_exponent)
            .map_err(MechError::input)?;
        Ok(())
    }
}

/// Equivalent dynamic load P = X·Fr + Y·Fa (N).
///
/// # Errors
///
/// `InvalidLoad` when a force or factor is negative or not finite.
pub fn equivalent_load(case: &BearingLoadCase) -> MechResult<f64> {
    case.validate_loads()?;
    let p = equivalent_dynamic_load(case.x_factor, case.radial_force_n, case.y_factor, case.axial_force_n);
    check_finite_output("bearing", "equivalent_load", p)
}

/// Basic rating life L10 = (C/P)^p · 10⁶ revolutions.
///
/// # Errors
///
/// * `InvalidLoad` - P negative or not finite, or C not positive
/// * `DivisionByZero` - P = 0
/// * `InvalidInput` - exponent not positive
/// * `CalculationFailed` - result overflows
pub fn life_revolutions(dynamic_capacity_n: f64, equivalent_load_n: f64, life_exponent: f64) -> MechResult<f64> {
    NON_NEGATIVE
        .check("equivalent_load_n", equivalent_load_n)
        .map_err(MechError::load)?;
    if equivalent_load_n == 0.0 {
        return Err(MechError::division_by_zero(
            "equivalent_load_n",
            "Rating life is unbounded at zero equivalent load",
        ));
    }
    POSITIVE
        .check("dynamic_capacity_n", dynamic_capacity_n)
        .map_err(MechError::load)?;
    POSITIVE.check("life_exponent", life_exponent).map_err(MechError::input)?;

    let l10 = basic_rating_life(dynamic_capacity_n, equivalent_load_n, life_exponent);
    check_finite_output("bearing", "life_revolutions", l10)
}

/// Rating life in hours: L10h = L10 / (60 · n).
///
/// # Errors
///
/// * `InvalidSpeed` - n not positive or not finite
/// * `InvalidInput` - L10 negative or not finite
/// * `CalculationFailed` - result overflows (very slow shaft)
pub fn life_hours(life_revolutions: f64, speed_rpm: f64) -> MechResult<f64> {
    if !(speed_rpm > 0.0) || !speed_rpm.is_finite() {
        return Err(MechError::invalid_speed(speed_rpm, "Speed must be positive"));
    }
    NON_NEGATIVE
        .check("life_revolutions", life_revolutions)
        .map_err(MechError::input)?;
    check_finite_output("bearing", "life_hours", rating_life_hours(life_revolutions, speed_rpm))
}

/// Dynamic rating needed for a bearing to reach a target life.
///
/// C_req = P · (L / 10⁶)^(1/p)
pub fn required_dynamic_capacity(equivalent_load_n: f64, life_revolutions: f64, life_exponent: f64) -> MechResult<f64> {
    NON_NEGATIVE
        .check("equivalent_load_n", equivalent_load_n)
        .map_err(MechError::load)?;
    NON_NEGATIVE
        .check("life_revolutions", life_revolutions)
        .map_err(MechError::input)?;
    POSITIVE.check("life_exponent", life_exponent).map_err(MechError::input)?;
    let c = capacity_for_life(equivalent_load_n, life_revolutions, life_exponent);
    check_finite_output("bearing", "required_dynamic_capacity", c)
}

// ============================================================================
// Composite Check
// ============================================================================

/// Input for a complete bearing check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingInput {
    /// User label (e.g., "B-1", "Output shaft, drive end")
    pub label: String,

    pub load_case: BearingLoadCase,

    /// Shaft speed (rpm)
    pub speed_rpm: f64,

    /// Target L10 life in hours, if the bearing is checked against one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_life_hours: Option<f64>,

    /// Basic static load rating C0 (N), for the static safety factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_capacity_n: Option<f64>,
}

impl BearingInput {
    /// Validate every input before anything is computed.
    pub fn validate(&self) -> MechResult<()> {
        self.load_case.validate()?;
        if !(self.speed_rpm > 0.0) || !self.speed_rpm.is_finite() {
            return Err(MechError::invalid_speed(self.speed_rpm, "Speed must be positive"));
        }
        if let Some(hours) = self.required_life_hours {
            POSITIVE.check("required_life_hours", hours).map_err(MechError::input)?;
        }
        if let Some(c0) = self.static_capacity_n {
            POSITIVE.check("static_capacity_n", c0).map_err(MechError::load)?;
        }
        Ok(())
    }
}

/// Result of a complete bearing check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingResult {
    /// P (N)
    pub equivalent_load_n: f64,

    /// C / P
    pub load_ratio: f64,

    /// L10 (revolutions)
    pub life_revolutions: f64,

    /// L10h (hours)
    pub life_hours: f64,

    /// L10h / required hours (≥ 1.0 passes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_ratio: Option<f64>,

    /// C needed to just meet the required life (N)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_dynamic_capacity_n: Option<f64>,

    /// s0 = C0 / P0 with P0 = Fr + Fa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_safety_factor: Option<f64>,

    /// Equations applied
    pub equations: EquationTracker,
}

impl BearingResult {
    /// True unless a required life was given and is not met
    pub fn passes(&self) -> bool {
        self.life_ratio.map_or(true, |ratio| ratio >= 1.0)
    }
}

/// Run a complete bearing check.
pub fn calculate(input: &BearingInput) -> MechResult<BearingResult> {
    input.validate()?;
    let case = &input.load_case;
    debug!(label = %input.label, speed_rpm = input.speed_rpm, "checking bearing");

    let mut tracker = EquationTracker::new();

    let p = equivalent_load(case)?;
    tracker.record(Equation::EquivalentDynamicLoad, "Equivalent load");

    let l10 = life_revolutions(case.dynamic_capacity_n, p, case.life_exponent)?;
    tracker.record(Equation::BasicRatingLife, "L10 life");

    let hours = life_hours(l10, input.speed_rpm)?;
    tracker.record(Equation::RatingLifeHours, "L10 life");

    let (life_ratio, required_capacity) = match input.required_life_hours {
        Some(required_hours) => {
            let required_revolutions = required_hours * MINUTES_PER_HOUR * input.speed_rpm;
            let c_req = required_dynamic_capacity(p, required_revolutions, case.life_exponent)?;
            tracker.record(Equation::RequiredDynamicCapacity, "Required life");
            let life_ratio = check_finite_output("bearing", "life_ratio", hours / required_hours)?;
            (Some(life_ratio), Some(c_req))
        }
        None => (None, None),
    };

    // P > 0 guarantees Fr + Fa > 0
    let static_safety = input.static_capacity_n.map(|c0| {
        tracker.record(Equation::StaticSafetyFactor, "Static check");
        static_safety_factor(c0, case.radial_force_n + case.axial_force_n)
    });

    debug!(
        label = %input.label,
        equivalent_load_n = p,
        life_hours = hours,
        "bearing checked"
    );

    Ok(BearingResult {
        equivalent_load_n: p,
        load_ratio: case.dynamic_capacity_n / p,
        life_revolutions: l10,
        life_hours: hours,
        life_ratio,
        required_dynamic_capacity_n: required_capacity,
        static_safety_factor: static_safety,
        equations: tracker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_load_pure_radial() {
        let case = BearingLoadCase::ball(1000.0, 0.0, 1.0, 0.0, 10_000.0);
        assert_eq!(equivalent_load(&case).unwrap(), 1000.0);
    }

    #[test]
    fn test_equivalent_load_combined() {
        let case = BearingLoadCase::ball(3000.0, 800.0, 0.56, 1.8, 25_500.0);
        // 0.56 * 3000 + 1.8 * 800 = 1680 + 1440
        assert!((equivalent_load(&case).unwrap() - 3120.0).abs() < 1e-9);
    }

    #[test]
    fn test_equivalent_load_rejects_negative() {
        let negative_force = BearingLoadCase::ball(-1.0, 0.0, 1.0, 0.0, 10_000.0);
        assert_eq!(equivalent_load(&negative_force).unwrap_err().error_code(), "INVALID_LOAD");

        let negative_factor = BearingLoadCase::ball(1000.0, 200.0, 1.0, -0.5, 10_000.0);
        let err = equivalent_load(&negative_factor).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert!(err.to_string().contains("y_factor"));

        let nan_force = BearingLoadCase::ball(f64::NAN, 0.0, 1.0, 0.0, 10_000.0);
        assert!(equivalent_load(&nan_force).is_err());
    }

    #[test]
    fn test_life_revolutions() {
        let l10 = life_revolutions(10_000.0, 5_000.0, 3.0).unwrap();
        assert!((l10 - 8.0e6).abs() / 8.0e6 < 0.01);
    }

    #[test]
    fn test_life_hours() {
        let hours = life_hours(8.0e6, 1500.0).unwrap();
        assert!((hours - 88.9).abs() / 88.9 < 0.01);
    }

    #[test]
    fn test_zero_load_is_division_by_zero() {
        let err = life_revolutions(10_000.0, 0.0, 3.0).unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_life_revolutions_rejections() {
        assert_eq!(life_revolutions(10_000.0, -5.0, 3.0).unwrap_err().error_code(), "INVALID_LOAD");
        assert_eq!(life_revolutions(10_000.0, f64::NAN, 3.0).unwrap_err().error_code(), "INVALID_LOAD");
        assert_eq!(life_revolutions(0.0, 5_000.0, 3.0).unwrap_err().error_code(), "INVALID_LOAD");
        assert_eq!(life_revolutions(10_000.0, 5_000.0, 0.0).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_life_revolutions_never_infinite() {
        // (C / P)^p overflows for a vanishing load
        let err = life_revolutions(1.0e300, 1.0e-300, 3.0).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_life_hours_never_infinite() {
        // Finite L10 at a vanishing speed overflows the hour count
        let l10 = life_revolutions(1.0e100, 1.0, 3.0).unwrap();
        assert!(l10.is_finite());
        let err = life_hours(l10, 1.0e-10).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("life_hours"));
    }

    #[test]
    fn test_composite_rejects_unbounded_life() {
        let input = BearingInput {
            label: "B-5".to_string(),
            load_case: BearingLoadCase::ball(1.0, 0.0, 1.0, 0.0, 1.0e100),
            speed_rpm: 1.0e-10,
            required_life_hours: Some(10_000.0),
            static_capacity_n: None,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");

        // Finite hours, but a vanishing target overflows the life ratio
        let tiny_target = BearingInput {
            speed_rpm: 1.0,
            required_life_hours: Some(1.0e-10),
            ..input
        };
        let err = calculate(&tiny_target).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("life_ratio"));
    }

    #[test]
    fn test_life_hours_rejects_speed() {
        assert_eq!(life_hours(8.0e6, 0.0).unwrap_err().error_code(), "INVALID_SPEED");
        assert_eq!(life_hours(8.0e6, -100.0).unwrap_err().error_code(), "INVALID_SPEED");
        assert_eq!(life_hours(-1.0, 1500.0).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_roller_exponent() {
        let case = BearingLoadCase::roller(5_000.0, 0.0, 1.0, 0.0, 10_000.0);
        let p = equivalent_load(&case).unwrap();
        let l10 = life_revolutions(case.dynamic_capacity_n, p, case.life_exponent).unwrap();
        assert!((l10 - 2.0_f64.powf(10.0 / 3.0) * 1.0e6).abs() < 1e-3);
    }

    #[test]
    fn test_composite_check() {
        let input = BearingInput {
            label: "B-1".to_string(),
            load_case: BearingLoadCase::ball(5_000.0, 0.0, 1.0, 0.0, 10_000.0),
            speed_rpm: 1500.0,
            required_life_hours: Some(50.0),
            static_capacity_n: Some(7_500.0),
        };
        let result = calculate(&input).unwrap();

        assert!((result.load_ratio - 2.0).abs() < 1e-12);
        assert!((result.life_revolutions - 8.0e6).abs() < 1e-3);
        assert!((result.life_hours - 8.0e6 / 90_000.0).abs() < 1e-9);
        assert!(result.passes());
        assert!((result.static_safety_factor.unwrap() - 1.5).abs() < 1e-12);

        // 50 h at 1500 rpm = 4.5e6 rev; C = 5000 * 4.5^(1/3)
        let c_req = result.required_dynamic_capacity_n.unwrap();
        assert!((c_req - 5_000.0 * 4.5_f64.powf(1.0 / 3.0)).abs() < 1e-6);
        assert!(result.equations.contains(Equation::StaticSafetyFactor));
    }

    #[test]
    fn test_composite_fails_required_life() {
        let input = BearingInput {
            label: "B-2".to_string(),
            load_case: BearingLoadCase::ball(5_000.0, 0.0, 1.0, 0.0, 10_000.0),
            speed_rpm: 1500.0,
            required_life_hours: Some(10_000.0),
            static_capacity_n: None,
        };
        let result = calculate(&input).unwrap();
        assert!(!result.passes());
        assert!(result.required_dynamic_capacity_n.unwrap() > 10_000.0);
        assert!(result.static_safety_factor.is_none());
    }

    #[test]
    fn test_composite_validates_eagerly() {
        let input = BearingInput {
            label: "B-3".to_string(),
            load_case: BearingLoadCase::ball(5_000.0, 0.0, 1.0, 0.0, 10_000.0),
            speed_rpm: 0.0,
            required_life_hours: None,
            static_capacity_n: None,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_SPEED");

        let unloaded = BearingInput {
            speed_rpm: 1500.0,
            load_case: BearingLoadCase::ball(0.0, 0.0, 1.0, 0.0, 10_000.0),
            ..input
        };
        assert_eq!(calculate(&unloaded).unwrap_err().error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "label": "B-4",
            "load_case": { "radial_force_n": 2000.0, "x_factor": 1.0, "dynamic_capacity_n": 14000.0 },
            "speed_rpm": 900.0
        }"#;
        let input: BearingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.load_case.life_exponent, BALL_LIFE_EXPONENT);
        assert_eq!(input.load_case.axial_force_n, 0.0);
        assert!(input.required_life_hours.is_none());
        assert!(calculate(&input).is_ok());
    }
}
