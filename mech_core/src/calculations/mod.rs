//! # Machine Element Calculations
//!
//! Checked calculations built on the raw formulas in [`crate::equations`].
//! Each calculation follows the pattern:
//!
//! - an input value (JSON-serializable)
//! - a `*Result` (JSON-serializable, carries the equations it applied)
//! - a pure function returning `MechResult<*Result>`, validating every input
//!   before computing anything
//!
//! ## Available Calculations
//!
//! - [`gear_train`] - Multi-stage gear train ratio and direction
//! - [`linkage`] - Four-bar linkage feasibility and transmission angle
//! - [`bearing`] - Rolling bearing equivalent load and L10 life

pub mod bearing;
pub mod gear_train;
pub mod linkage;

use serde::{Deserialize, Serialize};

use crate::equations::registry::EquationTracker;
use crate::errors::MechResult;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use bearing::{BearingInput, BearingLoadCase, BearingResult};
pub use gear_train::{Direction, FixedMember, GearKind, GearStage, GearTrain, GearTrainResult, PlanetaryStage};
pub use linkage::{FourBarLinkage, GrashofClass, LinkageResult};

/// Labelled four-bar linkage, as stored in a calculation file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageInput {
    pub label: String,
    #[serde(flatten)]
    pub linkage: FourBarLinkage,
}

/// Enum wrapper for all calculation types.
///
/// A calculation file is a JSON array of these:
///
/// ```json
/// [
///   { "type": "GearTrain", "label": "GB-1", "stages": [ ... ] },
///   { "type": "Linkage", "label": "L-1", "ground": 7.0, "crank": 2.0, "coupler": 9.0, "rocker": 6.0 },
///   { "type": "Bearing", "label": "B-1", "load_case": { ... }, "speed_rpm": 1450.0 }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    GearTrain(GearTrain),
    Linkage(LinkageInput),
    Bearing(BearingInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::GearTrain(g) => &g.label,
            CalculationItem::Linkage(l) => &l.label,
            CalculationItem::Bearing(b) => &b.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::GearTrain(_) => "Gear Train",
            CalculationItem::Linkage(_) => "Linkage",
            CalculationItem::Bearing(_) => "Bearing",
        }
    }

    /// Run the calculation.
    pub fn run(&self, settings: &DesignSettings) -> MechResult<CalculationOutput> {
        match self {
            CalculationItem::GearTrain(train) => gear_train::compose(train).map(CalculationOutput::GearTrain),
            CalculationItem::Linkage(input) => {
                linkage::analyze_with(&input.linkage, settings).map(CalculationOutput::Linkage)
            }
            CalculationItem::Bearing(input) => bearing::calculate(input).map(CalculationOutput::Bearing),
        }
    }
}

/// Result of any calculation, tagged like [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    GearTrain(GearTrainResult),
    Linkage(LinkageResult),
    Bearing(BearingResult),
}

impl CalculationOutput {
    /// Equations the calculation applied
    pub fn equations(&self) -> &EquationTracker {
        match self {
            CalculationOutput::GearTrain(r) => &r.equations,
            CalculationOutput::Linkage(r) => &r.equations,
            CalculationOutput::Bearing(r) => &r.equations,
        }
    }

    /// False when the result carries an advisory or failed check
    pub fn is_acceptable(&self) -> bool {
        match self {
            CalculationOutput::GearTrain(_) => true,
            CalculationOutput::Linkage(r) => !r.poor_transmission,
            CalculationOutput::Bearing(r) => r.passes(),
        }
    }
}

/// Parse a calculation file (a JSON array of tagged items).
pub fn parse_calculations(json: &str) -> MechResult<Vec<CalculationItem>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"[
        { "type": "GearTrain", "label": "GB-1",
          "stages": [ { "module_mm": 2.0, "kind": { "type": "external", "teeth_driver": 20, "teeth_driven": 60 } } ] },
        { "type": "Linkage", "label": "L-1", "ground": 7.0, "crank": 2.0, "coupler": 9.0, "rocker": 6.0 },
        { "type": "Bearing", "label": "B-1",
          "load_case": { "radial_force_n": 5000.0, "x_factor": 1.0, "dynamic_capacity_n": 10000.0 },
          "speed_rpm": 1500.0 }
    ]"#;

    #[test]
    fn test_parse_and_run_file() {
        let items = parse_calculations(FILE).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].label(), "GB-1");
        assert_eq!(items[1].calc_type(), "Linkage");

        let settings = DesignSettings::default();
        let outputs: Vec<_> = items.iter().map(|item| item.run(&settings).unwrap()).collect();

        match &outputs[0] {
            CalculationOutput::GearTrain(r) => assert!((r.overall_ratio - 3.0).abs() < 1e-12),
            other => panic!("unexpected output: {:?}", other),
        }
        // 7-2-9-6 crank-rocker has min μ ≈ 31.6°
        assert!(!outputs[1].is_acceptable());
        assert!(outputs[2].is_acceptable());
        assert!(!outputs[2].equations().usages().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let err = parse_calculations(r#"[{ "type": "Cam", "label": "C-1" }]"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_item_serialization_tag() {
        let item = CalculationItem::Linkage(LinkageInput {
            label: "L-2".to_string(),
            linkage: FourBarLinkage::new(4.0, 1.0, 4.0, 3.0),
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Linkage\""));
        assert!(json.contains("\"crank\":1.0"));
    }
}
