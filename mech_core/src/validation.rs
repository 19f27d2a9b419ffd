//! # Range Validation
//!
//! Checks scalar inputs against physically valid ranges, independent of the
//! formula that will consume them. A failed check yields a [`RangeViolation`];
//! each calculation decides which [`MechError`] kind it maps to (a bad tooth
//! count is a geometry error, a negative force is a load error).
//!
//! ## Example
//!
//! ```rust
//! use mech_core::validation::{TEETH_RANGE, MODULE_RANGE_MM};
//!
//! assert!(TEETH_RANGE.check("teeth_driver", 20.0).is_ok());
//! assert!(TEETH_RANGE.check("teeth_driver", 8.0).is_err());
//! assert!(MODULE_RANGE_MM.contains(2.5));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{MechError, MechResult};

/// A scalar input that fell outside its valid range.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("'{field}' = {value}: {reason}")]
pub struct RangeViolation {
    pub field: String,
    pub value: f64,
    pub reason: String,
}

/// Interval of physically meaningful values for one kind of parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl ValidRange {
    /// Closed interval [min, max]
    pub const fn closed(min: f64, max: f64) -> Self {
        Self { min, max, min_inclusive: true, max_inclusive: true }
    }

    /// Strictly positive values (0, ∞)
    pub const fn positive() -> Self {
        Self { min: 0.0, max: f64::INFINITY, min_inclusive: false, max_inclusive: false }
    }

    /// Non-negative values [0, ∞)
    pub const fn non_negative() -> Self {
        Self { min: 0.0, max: f64::INFINITY, min_inclusive: true, max_inclusive: false }
    }

    /// Whether `value` lies in the range. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above = if self.min_inclusive { value >= self.min } else { value > self.min };
        let below = if self.max_inclusive { value <= self.max } else { value < self.max };
        above && below
    }

    /// Check `value`, returning it unchanged when valid.
    pub fn check(&self, field: &str, value: f64) -> Result<f64, RangeViolation> {
        if self.contains(value) {
            return Ok(value);
        }
        let reason = if !value.is_finite() {
            "must be a finite number".to_string()
        } else {
            format!("must be within {}", self)
        };
        Err(RangeViolation {
            field: field.to_string(),
            value,
            reason,
        })
    }
}

impl fmt::Display for ValidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        let close = if self.max_inclusive { ']' } else { ')' };
        if self.max.is_infinite() {
            write!(f, "{}{}, ∞)", open, self.min)
        } else {
            write!(f, "{}{}, {}{}", open, self.min, self.max, close)
        }
    }
}

// ============================================================================
// Standard Ranges
// ============================================================================

/// Tooth count for any gear in a train
pub const TEETH_RANGE: ValidRange = ValidRange::closed(10.0, 200.0);

/// Gear module in millimetres
pub const MODULE_RANGE_MM: ValidRange = ValidRange::closed(0.5, 20.0);

/// Link lengths, capacities, speeds
pub const POSITIVE: ValidRange = ValidRange::positive();

/// Forces and load factors
pub const NON_NEGATIVE: ValidRange = ValidRange::non_negative();

/// Mechanical efficiency of a mesh or train
pub const EFFICIENCY_RANGE: ValidRange = ValidRange {
    min: 0.0,
    max: 1.0,
    min_inclusive: false,
    max_inclusive: true,
};

/// Any angle between two links of a planar loop
pub const LINK_ANGLE_RANGE_DEG: ValidRange = ValidRange {
    min: 0.0,
    max: 180.0,
    min_inclusive: false,
    max_inclusive: false,
};

/// Which error kind a named parameter reports when out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Geometry,
    Load,
    Speed,
    Input,
}

/// A named parameter: its valid range and how violations are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub range: ValidRange,
    pub kind: ParameterKind,
}

const fn param(range: ValidRange, kind: ParameterKind) -> ParameterRange {
    ParameterRange { range, kind }
}

/// Named parameter ranges for gating loose literal values (e.g. CLI
/// arguments) before they are assembled into calculation inputs.
pub static PARAMETER_RANGES: Lazy<BTreeMap<&'static str, ParameterRange>> = Lazy::new(|| {
    BTreeMap::from([
        ("teeth", param(TEETH_RANGE, ParameterKind::Geometry)),
        ("module_mm", param(MODULE_RANGE_MM, ParameterKind::Geometry)),
        ("link_length", param(POSITIVE, ParameterKind::Geometry)),
        ("force_n", param(NON_NEGATIVE, ParameterKind::Load)),
        ("load_factor", param(NON_NEGATIVE, ParameterKind::Load)),
        ("torque_nm", param(NON_NEGATIVE, ParameterKind::Load)),
        ("dynamic_capacity_n", param(POSITIVE, ParameterKind::Load)),
        ("static_capacity_n", param(POSITIVE, ParameterKind::Load)),
        ("speed_rpm", param(POSITIVE, ParameterKind::Speed)),
        ("life_exponent", param(POSITIVE, ParameterKind::Input)),
        ("life_hours", param(POSITIVE, ParameterKind::Input)),
        ("efficiency", param(EFFICIENCY_RANGE, ParameterKind::Input)),
    ])
});

/// Look up the valid range for a named parameter.
pub fn range_for(parameter: &str) -> Option<&'static ParameterRange> {
    PARAMETER_RANGES.get(parameter)
}

/// Validate `value` for `field` against the named parameter range.
///
/// The error kind follows the parameter: a bad module is `InvalidGeometry`,
/// a negative force `InvalidLoad`, a non-positive speed `InvalidSpeed`.
pub fn check_parameter(parameter: &str, field: &str, value: f64) -> MechResult<f64> {
    let entry = range_for(parameter).ok_or_else(|| {
        MechError::invalid_input(field, value, format!("Unknown parameter name '{}'", parameter))
    })?;
    entry.range.check(field, value).map_err(|violation| match entry.kind {
        ParameterKind::Geometry => MechError::geometry(violation),
        ParameterKind::Load => MechError::load(violation),
        ParameterKind::Speed => MechError::invalid_speed(violation.value, violation.reason),
        ParameterKind::Input => MechError::input(violation),
    })
}

/// Validate a tooth count. Zero is reported as non-positive before the
/// range bound is considered.
pub fn check_teeth(field: &str, teeth: u32) -> Result<u32, RangeViolation> {
    if teeth == 0 {
        return Err(RangeViolation {
            field: field.to_string(),
            value: 0.0,
            reason: "Tooth count must be positive".to_string(),
        });
    }
    TEETH_RANGE.check(field, f64::from(teeth))?;
    Ok(teeth)
}

/// Output sanity check: a computed quantity must be a finite number.
pub fn check_finite_output(calculation_type: &str, field: &str, value: f64) -> MechResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MechError::calculation_failed(
            calculation_type,
            format!("'{}' evaluated to {}, expected a finite number", field, value),
        ))
    }
}
