//! # Error Types
//!
//! Structured error types for mech_core. Each variant names the class of
//! problem (bad geometry, bad load, missing configuration) and carries enough
//! context for a caller to fix the offending parameter programmatically.
//!
//! ## Example
//!
//! ```rust
//! use mech_core::errors::{MechError, MechResult};
//!
//! fn validate_speed(n_rpm: f64) -> MechResult<()> {
//!     if n_rpm <= 0.0 {
//!         return Err(MechError::invalid_speed(n_rpm, "Speed must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_speed(0.0).unwrap_err().error_code(), "INVALID_SPEED");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::RangeViolation;

/// Result type alias for mech_core operations
pub type MechResult<T> = Result<T, MechError>;

/// Structured error type for calculation operations.
///
/// Errors are raised before any computation starts and are never replaced
/// by a default value. Recovery (re-prompting, correcting input) is up to the
/// caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum MechError {
    /// Non-positive or out-of-range tooth count, module or link length
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Missing or inconsistent configuration (e.g. planetary fixed member)
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// Four-bar link lengths cannot form a closed loop
    #[error("Unclosable linkage {lengths:?}: {reason}")]
    UnclosableLinkage { lengths: [f64; 4], reason: String },

    /// Negative or non-finite force, load factor or capacity
    #[error("Invalid load for '{field}': {value} - {reason}")]
    InvalidLoad {
        field: String,
        value: String,
        reason: String,
    },

    /// Non-positive rotational speed
    #[error("Invalid speed: {value} rpm - {reason}")]
    InvalidSpeed { value: String, reason: String },

    /// A divisor that must be non-zero was zero
    #[error("Division by zero: {quantity} - {reason}")]
    DivisionByZero { quantity: String, reason: String },

    /// Any other invalid input value
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The result failed an output sanity check (overflow, NaN)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl MechError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        MechError::InvalidGeometry {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigurationError
    pub fn configuration(reason: impl Into<String>) -> Self {
        MechError::ConfigurationError { reason: reason.into() }
    }

    /// Create an UnclosableLinkage error
    pub fn unclosable_linkage(lengths: [f64; 4], reason: impl Into<String>) -> Self {
        MechError::UnclosableLinkage {
            lengths,
            reason: reason.into(),
        }
    }

    /// Create an InvalidLoad error
    pub fn invalid_load(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        MechError::InvalidLoad {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSpeed error
    pub fn invalid_speed(value: impl ToString, reason: impl Into<String>) -> Self {
        MechError::InvalidSpeed {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        MechError::DivisionByZero {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        MechError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        MechError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl ToString) -> Self {
        MechError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Report a range violation as a geometry error
    pub fn geometry(violation: RangeViolation) -> Self {
        MechError::InvalidGeometry {
            field: violation.field,
            value: violation.value.to_string(),
            reason: violation.reason,
        }
    }

    /// Report a range violation as a load error
    pub fn load(violation: RangeViolation) -> Self {
        MechError::InvalidLoad {
            field: violation.field,
            value: violation.value.to_string(),
            reason: violation.reason,
        }
    }

    /// Report a range violation as a generic input error
    pub fn input(violation: RangeViolation) -> Self {
        MechError::InvalidInput {
            field: violation.field,
            value: violation.value.to_string(),
            reason: violation.reason,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            MechError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            MechError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            MechError::UnclosableLinkage { .. } => "UNCLOSABLE_LINKAGE",
            MechError::InvalidLoad { .. } => "INVALID_LOAD",
            MechError::InvalidSpeed { .. } => "INVALID_SPEED",
            MechError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            MechError::InvalidInput { .. } => "INVALID_INPUT",
            MechError::CalculationFailed { .. } => "CALCULATION_FAILED",
            MechError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for MechError {
    fn from(err: serde_json::Error) -> Self {
        MechError::serialization(err)
    }
}

impl From<toml::de::Error> for MechError {
    fn from(err: toml::de::Error) -> Self {
        MechError::serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = MechError::invalid_geometry("teeth_driver", 0, "Tooth count must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: MechError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MechError::configuration("missing").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            MechError::unclosable_linkage([10.0, 25.0, 10.0, 10.0], "open").error_code(),
            "UNCLOSABLE_LINKAGE"
        );
        assert_eq!(MechError::division_by_zero("P", "zero load").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(MechError::invalid_speed(0.0, "zero").error_code(), "INVALID_SPEED");
    }

    #[test]
    fn test_range_violation_mapping() {
        let violation = RangeViolation {
            field: "radial_force_n".to_string(),
            value: -5.0,
            reason: "must be non-negative".to_string(),
        };
        let err = MechError::load(violation);
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert!(err.to_string().contains("radial_force_n"));
    }

    #[test]
    fn test_display_message() {
        let err = MechError::invalid_speed(-10.0, "Speed must be positive");
        assert_eq!(err.to_string(), "Invalid speed: -10 rpm - Speed must be positive");
    }
}
