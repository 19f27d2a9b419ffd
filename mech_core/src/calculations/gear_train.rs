//! # Gear Train Composition
//!
//! Composes the overall ratio of a multi-stage gear train made of external
//! meshes, internal (ring) meshes and simple planetary sets.
//!
//! ## Conventions
//!
//! - A stage ratio is a positive speed reduction (input speed / output speed)
//! - Rotation sense is tracked separately as a [`Direction`] per stage:
//!   external meshes reverse, internal meshes do not
//! - Overall ratio = product of stage ratios, overall direction = product of
//!   stage directions
//! - Planetary stages must name their fixed member; it is never inferred
//!
//! ## Example
//!
//! ```rust
//! use mech_core::calculations::gear_train::{
//!     compose, Direction, FixedMember, GearStage, GearTrain, PlanetaryStage,
//! };
//!
//! let train = GearTrain::new("Hoist drive")
//!     .with_stage(GearStage::external(2.0, 20, 60))
//!     .with_stage(GearStage::planetary(
//!         1.5,
//!         PlanetaryStage::new(24, 24, 72, FixedMember::Ring),
//!     ));
//!
//! let result = compose(&train).unwrap();
//! assert!((result.overall_ratio - 12.0).abs() < 1e-9);
//! assert_eq!(result.overall_direction, Direction::Reversed);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::gear::{
    center_distance, gear_ratio, internal_center_distance, output_speed, output_torque,
    planetary_ratio_carrier_fixed, planetary_ratio_ring_fixed, planetary_ratio_sun_fixed,
    ring_teeth_for,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{MechError, MechResult};
use crate::validation::{check_finite_output, check_teeth, EFFICIENCY_RANGE, MODULE_RANGE_MM};

// ============================================================================
// Direction
// ============================================================================

/// Rotation sense of an output relative to its input.
///
/// Serialized as `1` (same sense) or `-1` (reversed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Same,
    Reversed,
}

impl Direction {
    /// +1 or -1
    pub fn sign(self) -> i8 {
        match self {
            Direction::Same => 1,
            Direction::Reversed => -1,
        }
    }

    /// Direction after passing through another stage
    pub fn then(self, next: Direction) -> Direction {
        if self == next {
            Direction::Same
        } else {
            Direction::Reversed
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.sign()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Same),
            -1 => Ok(Direction::Reversed),
            other => Err(format!("direction must be 1 or -1, got {}", other)),
        }
    }
}

// ============================================================================
// Stage Definitions
// ============================================================================

/// Member of a planetary set held stationary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedMember {
    /// Sun drives, carrier is the output
    Ring,
    /// Carrier drives, ring is the output
    Sun,
    /// Sun drives, ring is the output (star arrangement)
    Carrier,
}

/// Simple planetary set: sun, identical planets on a carrier, ring.
///
/// ## JSON Example
///
/// ```json
/// { "sun_teeth": 24, "planet_teeth": 24, "ring_teeth": 72, "fixed_member": "ring" }
/// ```
///
/// `fixed_member` may be omitted when deserializing, but composing a train
/// with a planetary stage that has no fixed member is a configuration error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryStage {
    pub sun_teeth: u32,
    pub planet_teeth: u32,
    pub ring_teeth: u32,
    #[serde(default)]
    pub fixed_member: Option<FixedMember>,
}

impl PlanetaryStage {
    pub fn new(sun_teeth: u32, planet_teeth: u32, ring_teeth: u32, fixed_member: FixedMember) -> Self {
        Self {
            sun_teeth,
            planet_teeth,
            ring_teeth,
            fixed_member: Some(fixed_member),
        }
    }

    /// Validate tooth counts, the coaxial proportion and the fixed member.
    /// Returns the fixed member on success.
    fn validate(&self, prefix: &str) -> MechResult<FixedMember> {
        check_teeth(&format!("{}.sun_teeth", prefix), self.sun_teeth).map_err(MechError::geometry)?;
        check_teeth(&format!("{}.planet_teeth", prefix), self.planet_teeth).map_err(MechError::geometry)?;
        check_teeth(&format!("{}.ring_teeth", prefix), self.ring_teeth).map_err(MechError::geometry)?;

        let expected_ring = ring_teeth_for(self.sun_teeth, self.planet_teeth);
        if self.ring_teeth != expected_ring {
            return Err(MechError::configuration(format!(
                "{}: ring_teeth ({}) must equal sun_teeth + 2 * planet_teeth ({})",
                prefix, self.ring_teeth, expected_ring
            )));
        }

        self.fixed_member.ok_or_else(|| {
            MechError::configuration(format!(
                "{}: planetary stage must specify fixed_member (ring, sun or carrier)",
                prefix
            ))
        })
    }

    /// Ratio, direction and governing equation for a given fixed member
    fn ratio(&self, fixed: FixedMember) -> (f64, Direction, Equation) {
        match fixed {
            FixedMember::Ring => (
                planetary_ratio_ring_fixed(self.sun_teeth, self.ring_teeth),
                Direction::Same,
                Equation::PlanetaryRingFixed,
            ),
            FixedMember::Sun => (
                planetary_ratio_sun_fixed(self.sun_teeth, self.ring_teeth),
                Direction::Same,
                Equation::PlanetarySunFixed,
            ),
            FixedMember::Carrier => (
                planetary_ratio_carrier_fixed(self.sun_teeth, self.ring_teeth),
                Direction::Reversed,
                Equation::PlanetaryCarrierFixed,
            ),
        }
    }
}

/// Kind of gear stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GearKind {
    /// Two external gears; output reverses
    External { teeth_driver: u32, teeth_driven: u32 },
    /// Pinion driving a ring gear; output keeps its sense
    Internal { teeth_driver: u32, teeth_driven: u32 },
    /// Simple planetary set
    Planetary(PlanetaryStage),
}

/// One stage of a gear train.
///
/// ## JSON Example
///
/// ```json
/// {
///   "module_mm": 2.0,
///   "kind": { "type": "external", "teeth_driver": 20, "teeth_driven": 60 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearStage {
    /// Module in millimetres (0.5 to 20)
    pub module_mm: f64,

    /// Stage kind and tooth counts
    pub kind: GearKind,
}

impl GearStage {
    /// External mesh stage
    pub fn external(module_mm: f64, teeth_driver: u32, teeth_driven: u32) -> Self {
        Self {
            module_mm,
            kind: GearKind::External { teeth_driver, teeth_driven },
        }
    }

    /// Internal (ring) mesh stage
    pub fn internal(module_mm: f64, teeth_driver: u32, teeth_driven: u32) -> Self {
        Self {
            module_mm,
            kind: GearKind::Internal { teeth_driver, teeth_driven },
        }
    }

    /// Planetary stage
    pub fn planetary(module_mm: f64, stage: PlanetaryStage) -> Self {
        Self {
            module_mm,
            kind: GearKind::Planetary(stage),
        }
    }

    /// Number of tooth meshes power passes through in this stage
    pub fn mesh_count(&self) -> u32 {
        match self.kind {
            GearKind::External { .. } | GearKind::Internal { .. } => 1,
            GearKind::Planetary(_) => 2,
        }
    }

    /// Validate this stage. `index` is zero-based and used in field names.
    pub fn validate(&self, index: usize) -> MechResult<()> {
        let prefix = format!("stages[{}]", index);

        MODULE_RANGE_MM
            .check(&format!("{}.module_mm", prefix), self.module_mm)
            .map_err(MechError::geometry)?;

        match &self.kind {
            GearKind::External { teeth_driver, teeth_driven } => {
                check_teeth(&format!("{}.teeth_driver", prefix), *teeth_driver).map_err(MechError::geometry)?;
                check_teeth(&format!("{}.teeth_driven", prefix), *teeth_driven).map_err(MechError::geometry)?;
            }
            GearKind::Internal { teeth_driver, teeth_driven } => {
                check_teeth(&format!("{}.teeth_driver", prefix), *teeth_driver).map_err(MechError::geometry)?;
                check_teeth(&format!("{}.teeth_driven", prefix), *teeth_driven).map_err(MechError::geometry)?;
                if teeth_driven <= teeth_driver {
                    return Err(MechError::invalid_geometry(
                        format!("{}.teeth_driven", prefix),
                        teeth_driven,
                        format!(
                            "Ring gear must have more teeth than the driving pinion ({})",
                            teeth_driver
                        ),
                    ));
                }
            }
            GearKind::Planetary(stage) => {
                stage.validate(&prefix)?;
            }
        }
        Ok(())
    }
}

/// An ordered sequence of stages from input shaft to output shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearTrain {
    /// User label (e.g., "GB-1", "Conveyor reducer")
    pub label: String,

    /// Stages in power-flow order
    pub stages: Vec<GearStage>,
}

impl GearTrain {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stages: Vec::new(),
        }
    }

    /// Builder: append a stage
    pub fn with_stage(mut self, stage: GearStage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Validate every stage before any ratio is computed.
    pub fn validate(&self) -> MechResult<()> {
        if self.stages.is_empty() {
            return Err(MechError::configuration(format!(
                "Gear train '{}' has no stages",
                self.label
            )));
        }
        for (index, stage) in self.stages.iter().enumerate() {
            stage.validate(index)?;
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Result of composing a gear train.
///
/// ## JSON Example
///
/// ```json
/// {
///   "overall_ratio": 12.0,
///   "overall_direction": -1,
///   "stage_ratios": [3.0, 4.0],
///   "stage_directions": [-1, 1],
///   "center_distances_mm": [80.0, 36.0],
///   "mesh_count": 3,
///   "equations": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearTrainResult {
    /// Product of stage ratio magnitudes
    pub overall_ratio: f64,

    /// Product of stage directions
    pub overall_direction: Direction,

    /// Ratio magnitude of each stage, in order
    pub stage_ratios: Vec<f64>,

    /// Direction of each stage, in order
    pub stage_directions: Vec<Direction>,

    /// Centre distance of each stage (sun-planet for planetary stages)
    pub center_distances_mm: Vec<f64>,

    /// Total tooth meshes in the power path
    pub mesh_count: u32,

    /// Equations applied
    pub equations: EquationTracker,
}

impl GearTrainResult {
    /// Overall ratio with the direction folded in as a sign
    pub fn signed_ratio(&self) -> f64 {
        self.overall_ratio * f64::from(self.overall_direction.sign())
    }

    /// Output speed magnitude for an input speed (rpm)
    pub fn output_speed_rpm(&self, input_rpm: f64) -> MechResult<f64> {
        if !(input_rpm > 0.0) || !input_rpm.is_finite() {
            return Err(MechError::invalid_speed(input_rpm, "Input speed must be positive"));
        }
        Ok(output_speed(input_rpm, self.overall_ratio))
    }

    /// Output torque for an input torque and a per-mesh efficiency.
    ///
    /// Losses compound over every mesh: η_total = η^meshes.
    pub fn output_torque_nm(&self, input_torque_nm: f64, mesh_efficiency: f64) -> MechResult<f64> {
        if !(input_torque_nm >= 0.0) || !input_torque_nm.is_finite() {
            return Err(MechError::invalid_load(
                "input_torque_nm",
                input_torque_nm,
                "Input torque must be non-negative",
            ));
        }
        EFFICIENCY_RANGE
            .check("mesh_efficiency", mesh_efficiency)
            .map_err(MechError::input)?;
        let overall_efficiency = mesh_efficiency.powi(self.mesh_count as i32);
        Ok(output_torque(input_torque_nm, self.overall_ratio, overall_efficiency))
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Compose the overall ratio and direction of a gear train.
///
/// # Errors
///
/// * `ConfigurationError` - empty train, planetary stage without a fixed
///   member, or ring teeth ≠ sun + 2 × planet
/// * `InvalidGeometry` - tooth count or module out of range, or an internal
///   mesh whose ring is not larger than its pinion
/// * `CalculationFailed` - the product is not finite
pub fn compose(train: &GearTrain) -> MechResult<GearTrainResult> {
    train.validate()?;
    debug!(label = %train.label, stages = train.stages.len(), "composing gear train");

    let mut tracker = EquationTracker::new();
    let mut stage_ratios = Vec::with_capacity(train.stages.len());
    let mut stage_directions = Vec::with_capacity(train.stages.len());
    let mut center_distances_mm = Vec::with_capacity(train.stages.len());
    let mut mesh_count = 0;

    for (index, stage) in train.stages.iter().enumerate() {
        let context = format!("Stage {}", index + 1);
        let m = stage.module_mm;

        let (ratio, direction, distance) = match &stage.kind {
            GearKind::External { teeth_driver, teeth_driven } => {
                tracker.record(Equation::GearRatio, context.as_str());
                tracker.record(Equation::CenterDistance, context.as_str());
                (
                    gear_ratio(*teeth_driver, *teeth_driven),
                    Direction::Reversed,
                    center_distance(m, *teeth_driver, *teeth_driven),
                )
            }
            GearKind::Internal { teeth_driver, teeth_driven } => {
                tracker.record(Equation::GearRatio, context.as_str());
                tracker.record(Equation::InternalCenterDistance, context.as_str());
                (
                    gear_ratio(*teeth_driver, *teeth_driven),
                    Direction::Same,
                    internal_center_distance(m, *teeth_driver, *teeth_driven),
                )
            }
            GearKind::Planetary(planetary) => {
                // validate() has already confirmed the fixed member is present
                let fixed = planetary.validate(&context)?;
                let (ratio, direction, equation) = planetary.ratio(fixed);
                tracker.record(Equation::PlanetaryRingTeeth, context.as_str());
                tracker.record(equation, context.as_str());
                tracker.record(Equation::CenterDistance, context.as_str());
                (
                    ratio,
                    direction,
                    center_distance(m, planetary.sun_teeth, planetary.planet_teeth),
                )
            }
        };

        debug!(stage = index + 1, ratio, direction = direction.sign(), "stage ratio");
        stage_ratios.push(ratio);
        stage_directions.push(direction);
        center_distances_mm.push(distance);
        mesh_count += stage.mesh_count();
    }

    let overall_ratio = stage_ratios.iter().product::<f64>();
    let overall_ratio = check_finite_output("gear_train", "overall_ratio", overall_ratio)?;
    let overall_direction = stage_directions
        .iter()
        .fold(Direction::Same, |acc, d| acc.then(*d));

    debug!(
        label = %train.label,
        overall_ratio,
        overall_direction = overall_direction.sign(),
        "gear train composed"
    );

    Ok(GearTrainResult {
        overall_ratio,
        overall_direction,
        stage_ratios,
        stage_directions,
        center_distances_mm,
        mesh_count,
        equations: tracker,
    })
}
