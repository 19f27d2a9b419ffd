//! # Equation Registry
//!
//! Central registry of every machine-design equation Machina implements.
//! Each equation carries its formula, reference, variables and the source
//! function that implements it, so a calculation result can cite exactly
//! which relations produced it.
//!
//! ## Usage
//!
//! ```rust
//! use mech_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::PlanetaryRingFixed, "Stage 2");
//!
//! let meta = Equation::PlanetaryRingFixed.metadata();
//! assert_eq!(meta.formula_plain, "i = 1 + R/S");
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a textbook or standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Shigley's Mechanical Engineering Design
    Shigley {
        edition: u8,
        section: &'static str,
    },
    /// Norton, Design of Machinery
    Norton {
        edition: u8,
        section: &'static str,
    },
    /// ISO standard
    Iso {
        number: &'static str,
        year: u16,
    },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Shigley { edition, section } => {
                format!("Shigley {}ed, Section {}", edition, section)
            }
            CodeReference::Norton { edition, section } => {
                format!("Norton, Design of Machinery {}ed, Section {}", edition, section)
            }
            CodeReference::Iso { number, year } => format!("ISO {}:{}", number, year),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Shigley { .. } => "Shigley",
            CodeReference::Norton { .. } => "Norton",
            CodeReference::Iso { .. } => "ISO",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

const SHIGLEY_GEARS: CodeReference = CodeReference::Shigley { edition: 10, section: "13-5" };
const SHIGLEY_PLANETARY: CodeReference = CodeReference::Shigley { edition: 10, section: "13-13" };
const SHIGLEY_BELTS: CodeReference = CodeReference::Shigley { edition: 10, section: "17-2" };
const SHIGLEY_CHAINS: CodeReference = CodeReference::Shigley { edition: 10, section: "17-5" };
const SHIGLEY_SHAFTS: CodeReference = CodeReference::Shigley { edition: 10, section: "3-12" };
const SHIGLEY_SPRINGS: CodeReference = CodeReference::Shigley { edition: 10, section: "10-3" };
const SHIGLEY_FLYWHEELS: CodeReference = CodeReference::Shigley { edition: 10, section: "16-12" };
const SHIGLEY_FASTENERS: CodeReference = CodeReference::Shigley { edition: 10, section: "8-2" };
const ISO_281: CodeReference = CodeReference::Iso { number: "281", year: 2007 };
const ISO_76: CodeReference = CodeReference::Iso { number: "76", year: 2006 };
const NORTON_GRASHOF: CodeReference = CodeReference::Norton { edition: 5, section: "2.12" };
const NORTON_TRANSMISSION: CodeReference = CodeReference::Norton { edition: 5, section: "4.10" };

// ============================================================================
// Equation Categories
// ============================================================================

/// Machine element an equation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    Gears,
    Planetary,
    Belts,
    Chains,
    Shafts,
    Bearings,
    Springs,
    Flywheels,
    Fasteners,
    Linkages,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Gears => "Spur Gears",
            EquationCategory::Planetary => "Planetary Gear Sets",
            EquationCategory::Belts => "Belt Drives",
            EquationCategory::Chains => "Chain Drives",
            EquationCategory::Shafts => "Shafts",
            EquationCategory::Bearings => "Rolling Bearings",
            EquationCategory::Springs => "Springs",
            EquationCategory::Flywheels => "Flywheels",
            EquationCategory::Fasteners => "Fasteners",
            EquationCategory::Linkages => "Four-Bar Linkages",
        }
    }

    /// Sort order for generated documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Gears => 1,
            EquationCategory::Planetary => 2,
            EquationCategory::Belts => 3,
            EquationCategory::Chains => 4,
            EquationCategory::Shafts => 5,
            EquationCategory::Bearings => 6,
            EquationCategory::Springs => 7,
            EquationCategory::Flywheels => 8,
            EquationCategory::Fasteners => 9,
            EquationCategory::Linkages => 10,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "m", "z1", "C")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm", "N", "rpm")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Basic Rating Life")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Textbook/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All machine-design equations used in Machina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Spur Gears
    // -------------------------------------------------------------------------
    /// i = z2/z1
    GearRatio,
    /// d = m z
    PitchDiameter,
    /// a = m(z1 + z2)/2
    CenterDistance,
    /// a = m(z2 - z1)/2
    InternalCenterDistance,
    /// h_a = 1.0 m
    Addendum,
    /// h_f = 1.25 m
    Dedendum,
    /// d_a = m(z + 2)
    OutsideDiameter,
    /// p = π m
    CircularPitch,
    /// n_out = n_in / i
    OutputSpeed,
    /// T_out = T_in i η
    OutputTorque,

    // -------------------------------------------------------------------------
    // Planetary
    // -------------------------------------------------------------------------
    /// R = S + 2P
    PlanetaryRingTeeth,
    /// i = 1 + R/S
    PlanetaryRingFixed,
    /// i = R/(R + S)
    PlanetarySunFixed,
    /// i = R/S, reversing
    PlanetaryCarrierFixed,

    // -------------------------------------------------------------------------
    // Belts
    // -------------------------------------------------------------------------
    BeltRatio,
    OpenBeltLength,
    BeltSpeed,

    // -------------------------------------------------------------------------
    // Chains
    // -------------------------------------------------------------------------
    SprocketPitchDiameter,
    ChainSpeed,
    ChainLength,

    // -------------------------------------------------------------------------
    // Shafts
    // -------------------------------------------------------------------------
    TorqueFromPower,
    PowerFromTorque,
    TorsionalShearStress,
    SolidShaftDiameter,

    // -------------------------------------------------------------------------
    // Bearings
    // -------------------------------------------------------------------------
    /// P = X Fr + Y Fa
    EquivalentDynamicLoad,
    /// L10 = (C/P)^p 10^6
    BasicRatingLife,
    /// L10h = L10 / (60 n)
    RatingLifeHours,
    /// C_req = P (L/10^6)^(1/p)
    RequiredDynamicCapacity,
    /// s0 = C0/P0
    StaticSafetyFactor,

    // -------------------------------------------------------------------------
    // Springs
    // -------------------------------------------------------------------------
    SpringIndex,
    WahlFactor,
    SpringRate,
    SpringShearStress,

    // -------------------------------------------------------------------------
    // Flywheels
    // -------------------------------------------------------------------------
    KineticEnergy,
    CoefficientOfFluctuation,
    EnergyFluctuation,
    RequiredMomentOfInertia,

    // -------------------------------------------------------------------------
    // Fasteners
    // -------------------------------------------------------------------------
    TensileStressArea,
    PreloadTorque,
    BoltTensileStress,

    // -------------------------------------------------------------------------
    // Linkages
    // -------------------------------------------------------------------------
    /// s + l <= p + q
    GrashofCondition,
    /// d² = g² + a² - 2ga cos θ
    DiagonalLength,
    /// cos μ = (b² + c² - d²)/(2bc)
    TransmissionAngle,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Spur gears
            Equation::GearRatio => EquationMetadata {
                name: "Gear Ratio",
                description: "Speed reduction of a single gear mesh",
                formula_plain: "i = z2/z1",
                reference: SHIGLEY_GEARS,
                variables: vec![
                    Variable::new("z1", "Driver tooth count", "-"),
                    Variable::new("z2", "Driven tooth count", "-"),
                    Variable::new("i", "Ratio (input speed / output speed)", "-"),
                ],
                assumptions: vec!["Magnitude only; direction tracked separately"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "gear_ratio",
            },

            Equation::PitchDiameter => EquationMetadata {
                name: "Pitch Diameter",
                description: "Pitch circle diameter of a spur gear",
                formula_plain: "d = m * z",
                reference: SHIGLEY_GEARS,
                variables: vec![
                    Variable::new("m", "Module", "mm"),
                    Variable::new("z", "Tooth count", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "pitch_diameter",
            },

            Equation::CenterDistance => EquationMetadata {
                name: "External Centre Distance",
                description: "Shaft centre distance of an external mesh",
                formula_plain: "a = m(z1 + z2)/2",
                reference: SHIGLEY_GEARS,
                variables: vec![
                    Variable::new("a", "Centre distance", "mm"),
                    Variable::new("m", "Module", "mm"),
                ],
                assumptions: vec!["Standard (unmodified) centre distance", "No profile shift"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "center_distance",
            },

            Equation::InternalCenterDistance => EquationMetadata {
                name: "Internal Centre Distance",
                description: "Centre distance of a pinion meshing inside a ring gear",
                formula_plain: "a = m(z2 - z1)/2",
                reference: SHIGLEY_GEARS,
                variables: vec![
                    Variable::new("z1", "Pinion tooth count", "-"),
                    Variable::new("z2", "Ring tooth count", "-"),
                ],
                assumptions: vec!["Ring has more teeth than pinion"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "internal_center_distance",
            },

            Equation::Addendum => EquationMetadata {
                name: "Addendum",
                description: "Radial height of tooth above the pitch circle",
                formula_plain: "h_a = 1.0 * m",
                reference: SHIGLEY_GEARS,
                variables: vec![Variable::new("m", "Module", "mm")],
                assumptions: vec!["Full-depth 20° involute tooth"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "addendum",
            },

            Equation::Dedendum => EquationMetadata {
                name: "Dedendum",
                description: "Radial depth of tooth below the pitch circle",
                formula_plain: "h_f = 1.25 * m",
                reference: SHIGLEY_GEARS,
                variables: vec![Variable::new("m", "Module", "mm")],
                assumptions: vec!["Full-depth 20° involute tooth"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "dedendum",
            },

            Equation::OutsideDiameter => EquationMetadata {
                name: "Outside Diameter",
                description: "Tip diameter of an external gear",
                formula_plain: "d_a = m(z + 2)",
                reference: SHIGLEY_GEARS,
                variables: vec![
                    Variable::new("m", "Module", "mm"),
                    Variable::new("z", "Tooth count", "-"),
                ],
                assumptions: vec!["Standard addendum"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "outside_diameter",
            },

            Equation::CircularPitch => EquationMetadata {
                name: "Circular Pitch",
                description: "Arc distance between adjacent teeth on the pitch circle",
                formula_plain: "p = pi * m",
                reference: SHIGLEY_GEARS,
                variables: vec![Variable::new("m", "Module", "mm")],
                assumptions: vec![],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "circular_pitch",
            },

            Equation::OutputSpeed => EquationMetadata {
                name: "Output Speed",
                description: "Output speed of a reduction train",
                formula_plain: "n_out = n_in / i",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("n_in", "Input speed", "rpm"),
                    Variable::new("i", "Overall ratio", "-"),
                ],
                assumptions: vec!["No slip"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "output_speed",
            },

            Equation::OutputTorque => EquationMetadata {
                name: "Output Torque",
                description: "Output torque of a reduction train including losses",
                formula_plain: "T_out = T_in * i * eta",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("T_in", "Input torque", "N·m"),
                    Variable::new("eta", "Overall efficiency", "-"),
                ],
                assumptions: vec!["Constant efficiency per mesh"],
                category: EquationCategory::Gears,
                source_module: "equations/gear.rs",
                source_function: "output_torque",
            },

            // Planetary
            Equation::PlanetaryRingTeeth => EquationMetadata {
                name: "Planetary Ring Tooth Count",
                description: "Coaxial condition for a simple planetary set",
                formula_plain: "R = S + 2P",
                reference: SHIGLEY_PLANETARY,
                variables: vec![
                    Variable::new("S", "Sun tooth count", "-"),
                    Variable::new("P", "Planet tooth count", "-"),
                    Variable::new("R", "Ring tooth count", "-"),
                ],
                assumptions: vec!["Same module on all gears", "No profile shift"],
                category: EquationCategory::Planetary,
                source_module: "equations/gear.rs",
                source_function: "ring_teeth_for",
            },

            Equation::PlanetaryRingFixed => EquationMetadata {
                name: "Planetary Ratio, Ring Fixed",
                description: "Sun input, carrier output, ring held stationary",
                formula_plain: "i = 1 + R/S",
                reference: SHIGLEY_PLANETARY,
                variables: vec![
                    Variable::new("S", "Sun tooth count", "-"),
                    Variable::new("R", "Ring tooth count", "-"),
                ],
                assumptions: vec!["Carrier rotates with the sun"],
                category: EquationCategory::Planetary,
                source_module: "equations/gear.rs",
                source_function: "planetary_ratio_ring_fixed",
            },

            Equation::PlanetarySunFixed => EquationMetadata {
                name: "Planetary Ratio, Sun Fixed",
                description: "Carrier input, ring output, sun held stationary",
                formula_plain: "i = R/(R + S)",
                reference: SHIGLEY_PLANETARY,
                variables: vec![
                    Variable::new("S", "Sun tooth count", "-"),
                    Variable::new("R", "Ring tooth count", "-"),
                ],
                assumptions: vec!["Overdrive; ring rotates with the carrier"],
                category: EquationCategory::Planetary,
                source_module: "equations/gear.rs",
                source_function: "planetary_ratio_sun_fixed",
            },

            Equation::PlanetaryCarrierFixed => EquationMetadata {
                name: "Planetary Ratio, Carrier Fixed",
                description: "Sun input, ring output, carrier held stationary (star)",
                formula_plain: "i = R/S",
                reference: SHIGLEY_PLANETARY,
                variables: vec![
                    Variable::new("S", "Sun tooth count", "-"),
                    Variable::new("R", "Ring tooth count", "-"),
                ],
                assumptions: vec!["Ring counter-rotates relative to the sun"],
                category: EquationCategory::Planetary,
                source_module: "equations/gear.rs",
                source_function: "planetary_ratio_carrier_fixed",
            },

            // Belts
            Equation::BeltRatio => EquationMetadata {
                name: "Belt Ratio",
                description: "Speed ratio of an open belt drive",
                formula_plain: "i = D_driven / D_driver",
                reference: SHIGLEY_BELTS,
                variables: vec![
                    Variable::new("D_driver", "Driver pulley pitch diameter", "mm"),
                    Variable::new("D_driven", "Driven pulley pitch diameter", "mm"),
                ],
                assumptions: vec!["No slip or creep"],
                category: EquationCategory::Belts,
                source_module: "equations/belt.rs",
                source_function: "belt_ratio",
            },

            Equation::OpenBeltLength => EquationMetadata {
                name: "Open Belt Length",
                description: "Pitch length of an open belt between two pulleys",
                formula_plain: "L = 2C + pi(D + d)/2 + (D - d)^2/(4C)",
                reference: SHIGLEY_BELTS,
                variables: vec![
                    Variable::new("C", "Centre distance", "mm"),
                    Variable::new("D", "Large pulley diameter", "mm"),
                    Variable::new("d", "Small pulley diameter", "mm"),
                ],
                assumptions: vec!["Approximation valid for C large relative to D - d"],
                category: EquationCategory::Belts,
                source_module: "equations/belt.rs",
                source_function: "open_belt_length",
            },

            Equation::BeltSpeed => EquationMetadata {
                name: "Belt Speed",
                description: "Linear speed of the belt",
                formula_plain: "v = pi * d * n / 60",
                reference: SHIGLEY_BELTS,
                variables: vec![
                    Variable::new("d", "Pulley pitch diameter", "m"),
                    Variable::new("n", "Pulley speed", "rpm"),
                    Variable::new("v", "Belt speed", "m/s"),
                ],
                assumptions: vec![],
                category: EquationCategory::Belts,
                source_module: "equations/belt.rs",
                source_function: "belt_speed",
            },

            // Chains
            Equation::SprocketPitchDiameter => EquationMetadata {
                name: "Sprocket Pitch Diameter",
                description: "Pitch diameter of a roller chain sprocket",
                formula_plain: "D = p / sin(180/N)",
                reference: SHIGLEY_CHAINS,
                variables: vec![
                    Variable::new("p", "Chain pitch", "mm"),
                    Variable::new("N", "Sprocket teeth", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Chains,
                source_module: "equations/chain.rs",
                source_function: "sprocket_pitch_diameter",
            },

            Equation::ChainSpeed => EquationMetadata {
                name: "Chain Speed",
                description: "Mean linear speed of a roller chain",
                formula_plain: "v = N * p * n / 60",
                reference: SHIGLEY_CHAINS,
                variables: vec![
                    Variable::new("N", "Sprocket teeth", "-"),
                    Variable::new("p", "Chain pitch", "m"),
                    Variable::new("n", "Sprocket speed", "rpm"),
                ],
                assumptions: vec!["Chordal speed variation ignored"],
                category: EquationCategory::Chains,
                source_module: "equations/chain.rs",
                source_function: "chain_speed",
            },

            Equation::ChainLength => EquationMetadata {
                name: "Chain Length",
                description: "Chain length in pitches for an open two-sprocket drive",
                formula_plain: "L/p = 2C/p + (N1 + N2)/2 + (N2 - N1)^2 / (4 pi^2 C/p)",
                reference: SHIGLEY_CHAINS,
                variables: vec![
                    Variable::new("C", "Centre distance", "mm"),
                    Variable::new("N1", "Small sprocket teeth", "-"),
                    Variable::new("N2", "Large sprocket teeth", "-"),
                ],
                assumptions: vec!["Round up to an even number of links"],
                category: EquationCategory::Chains,
                source_module: "equations/chain.rs",
                source_function: "chain_length_pitches",
            },

            // Shafts
            Equation::TorqueFromPower => EquationMetadata {
                name: "Torque from Power",
                description: "Torque carried by a shaft at a given power and speed",
                formula_plain: "T = P / omega, omega = 2 pi n / 60",
                reference: SHIGLEY_SHAFTS,
                variables: vec![
                    Variable::new("P", "Power", "W"),
                    Variable::new("n", "Speed", "rpm"),
                    Variable::new("T", "Torque", "N·m"),
                ],
                assumptions: vec!["Steady power"],
                category: EquationCategory::Shafts,
                source_module: "equations/shaft.rs",
                source_function: "torque_from_power",
            },

            Equation::PowerFromTorque => EquationMetadata {
                name: "Power from Torque",
                description: "Power transmitted by a torque at a given speed",
                formula_plain: "P = T * omega",
                reference: SHIGLEY_SHAFTS,
                variables: vec![
                    Variable::new("T", "Torque", "N·m"),
                    Variable::new("n", "Speed", "rpm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Shafts,
                source_module: "equations/shaft.rs",
                source_function: "power_from_torque",
            },

            Equation::TorsionalShearStress => EquationMetadata {
                name: "Torsional Shear Stress",
                description: "Maximum shear stress in a solid round shaft under torque",
                formula_plain: "tau = 16T / (pi d^3)",
                reference: SHIGLEY_SHAFTS,
                variables: vec![
                    Variable::new("T", "Torque", "N·mm"),
                    Variable::new("d", "Shaft diameter", "mm"),
                    Variable::new("tau", "Shear stress", "MPa"),
                ],
                assumptions: vec!["Linear elastic", "Solid circular section"],
                category: EquationCategory::Shafts,
                source_module: "equations/shaft.rs",
                source_function: "torsional_shear_stress",
            },

            Equation::SolidShaftDiameter => EquationMetadata {
                name: "Solid Shaft Diameter",
                description: "Minimum diameter for an allowable torsional shear stress",
                formula_plain: "d = (16T / (pi tau_allow))^(1/3)",
                reference: SHIGLEY_SHAFTS,
                variables: vec![
                    Variable::new("T", "Torque", "N·mm"),
                    Variable::new("tau_allow", "Allowable shear stress", "MPa"),
                ],
                assumptions: vec!["Pure torsion; bending not included"],
                category: EquationCategory::Shafts,
                source_module: "equations/shaft.rs",
                source_function: "solid_shaft_diameter",
            },

            // Bearings
            Equation::EquivalentDynamicLoad => EquationMetadata {
                name: "Equivalent Dynamic Load",
                description: "Combined radial and axial load used for rating life",
                formula_plain: "P = X * Fr + Y * Fa",
                reference: ISO_281,
                variables: vec![
                    Variable::new("Fr", "Radial load", "N"),
                    Variable::new("Fa", "Axial load", "N"),
                    Variable::new("X", "Radial load factor", "-"),
                    Variable::new("Y", "Axial load factor", "-"),
                ],
                assumptions: vec!["X and Y from the bearing catalogue for the Fa/Fr ratio"],
                category: EquationCategory::Bearings,
                source_module: "equations/bearing.rs",
                source_function: "equivalent_dynamic_load",
            },

            Equation::BasicRatingLife => EquationMetadata {
                name: "Basic Rating Life",
                description: "Revolutions reached by 90% of a bearing population",
                formula_plain: "L10 = (C/P)^p * 10^6",
                reference: ISO_281,
                variables: vec![
                    Variable::new("C", "Basic dynamic load rating", "N"),
                    Variable::new("P", "Equivalent dynamic load", "N"),
                    Variable::new("p", "Life exponent (3 ball, 10/3 roller)", "-"),
                ],
                assumptions: vec!["90% reliability", "Conventional materials and lubrication"],
                category: EquationCategory::Bearings,
                source_module: "equations/bearing.rs",
                source_function: "basic_rating_life",
            },

            Equation::RatingLifeHours => EquationMetadata {
                name: "Rating Life in Hours",
                description: "Basic rating life expressed as operating hours",
                formula_plain: "L10h = L10 / (60 n)",
                reference: ISO_281,
                variables: vec![
                    Variable::new("L10", "Rating life", "rev"),
                    Variable::new("n", "Speed", "rpm"),
                ],
                assumptions: vec!["Constant speed"],
                category: EquationCategory::Bearings,
                source_module: "equations/bearing.rs",
                source_function: "rating_life_hours",
            },

            Equation::RequiredDynamicCapacity => EquationMetadata {
                name: "Required Dynamic Capacity",
                description: "Dynamic load rating needed to reach a target life",
                formula_plain: "C_req = P * (L / 10^6)^(1/p)",
                reference: ISO_281,
                variables: vec![
                    Variable::new("P", "Equivalent dynamic load", "N"),
                    Variable::new("L", "Target life", "rev"),
                ],
                assumptions: vec!["90% reliability"],
                category: EquationCategory::Bearings,
                source_module: "equations/bearing.rs",
                source_function: "required_dynamic_capacity",
            },

            Equation::StaticSafetyFactor => EquationMetadata {
                name: "Static Safety Factor",
                description: "Margin of the static load rating over the static load",
                formula_plain: "s0 = C0 / P0",
                reference: ISO_76,
                variables: vec![
                    Variable::new("C0", "Basic static load rating", "N"),
                    Variable::new("P0", "Static equivalent load", "N"),
                ],
                assumptions: vec!["P0 taken conservatively as Fr + Fa"],
                category: EquationCategory::Bearings,
                source_module: "equations/bearing.rs",
                source_function: "static_safety_factor",
            },

            // Springs
            Equation::SpringIndex => EquationMetadata {
                name: "Spring Index",
                description: "Ratio of mean coil diameter to wire diameter",
                formula_plain: "C = D / d",
                reference: SHIGLEY_SPRINGS,
                variables: vec![
                    Variable::new("D", "Mean coil diameter", "mm"),
                    Variable::new("d", "Wire diameter", "mm"),
                ],
                assumptions: vec!["Preferred range 4 to 12"],
                category: EquationCategory::Springs,
                source_module: "equations/spring.rs",
                source_function: "spring_index",
            },

            Equation::WahlFactor => EquationMetadata {
                name: "Wahl Factor",
                description: "Curvature and direct shear correction for coil springs",
                formula_plain: "K_w = (4C - 1)/(4C - 4) + 0.615/C",
                reference: SHIGLEY_SPRINGS,
                variables: vec![Variable::new("C", "Spring index", "-")],
                assumptions: vec![],
                category: EquationCategory::Springs,
                source_module: "equations/spring.rs",
                source_function: "wahl_factor",
            },

            Equation::SpringRate => EquationMetadata {
                name: "Spring Rate",
                description: "Axial stiffness of a helical compression spring",
                formula_plain: "k = G d^4 / (8 D^3 Na)",
                reference: SHIGLEY_SPRINGS,
                variables: vec![
                    Variable::new("G", "Shear modulus", "MPa"),
                    Variable::new("Na", "Active coils", "-"),
                ],
                assumptions: vec!["Linear range, no coil clash"],
                category: EquationCategory::Springs,
                source_module: "equations/spring.rs",
                source_function: "spring_rate",
            },

            Equation::SpringShearStress => EquationMetadata {
                name: "Spring Shear Stress",
                description: "Corrected maximum shear stress in spring wire",
                formula_plain: "tau = K_w * 8 F D / (pi d^3)",
                reference: SHIGLEY_SPRINGS,
                variables: vec![
                    Variable::new("F", "Axial force", "N"),
                    Variable::new("D", "Mean coil diameter", "mm"),
                    Variable::new("d", "Wire diameter", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Springs,
                source_module: "equations/spring.rs",
                source_function: "spring_shear_stress",
            },

            // Flywheels
            Equation::KineticEnergy => EquationMetadata {
                name: "Rotational Kinetic Energy",
                description: "Energy stored in a rotating body",
                formula_plain: "E = 0.5 * I * omega^2",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("I", "Mass moment of inertia", "kg·m²"),
                    Variable::new("omega", "Angular velocity", "rad/s"),
                ],
                assumptions: vec![],
                category: EquationCategory::Flywheels,
                source_module: "equations/flywheel.rs",
                source_function: "kinetic_energy",
            },

            Equation::CoefficientOfFluctuation => EquationMetadata {
                name: "Coefficient of Speed Fluctuation",
                description: "Relative speed variation over a cycle",
                formula_plain: "Cs = (omega_max - omega_min) / omega_avg",
                reference: SHIGLEY_FLYWHEELS,
                variables: vec![
                    Variable::new("omega_max", "Maximum angular velocity", "rad/s"),
                    Variable::new("omega_min", "Minimum angular velocity", "rad/s"),
                ],
                assumptions: vec!["omega_avg taken as the arithmetic mean"],
                category: EquationCategory::Flywheels,
                source_module: "equations/flywheel.rs",
                source_function: "coefficient_of_fluctuation",
            },

            Equation::EnergyFluctuation => EquationMetadata {
                name: "Energy Fluctuation",
                description: "Energy released between maximum and minimum speed",
                formula_plain: "dE = 0.5 * I * (omega_max^2 - omega_min^2)",
                reference: SHIGLEY_FLYWHEELS,
                variables: vec![Variable::new("I", "Mass moment of inertia", "kg·m²")],
                assumptions: vec![],
                category: EquationCategory::Flywheels,
                source_module: "equations/flywheel.rs",
                source_function: "energy_fluctuation",
            },

            Equation::RequiredMomentOfInertia => EquationMetadata {
                name: "Required Flywheel Inertia",
                description: "Inertia needed to limit speed fluctuation",
                formula_plain: "I = dE / (Cs * omega_avg^2)",
                reference: SHIGLEY_FLYWHEELS,
                variables: vec![
                    Variable::new("dE", "Energy fluctuation", "J"),
                    Variable::new("Cs", "Coefficient of fluctuation", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Flywheels,
                source_module: "equations/flywheel.rs",
                source_function: "required_moment_of_inertia",
            },

            // Fasteners
            Equation::TensileStressArea => EquationMetadata {
                name: "Tensile Stress Area",
                description: "Effective tensile area of a metric thread",
                formula_plain: "A_t = (pi/4)(d - 0.9382 P)^2",
                reference: SHIGLEY_FASTENERS,
                variables: vec![
                    Variable::new("d", "Nominal diameter", "mm"),
                    Variable::new("P", "Thread pitch", "mm"),
                ],
                assumptions: vec!["ISO metric thread profile"],
                category: EquationCategory::Fasteners,
                source_module: "equations/fastener.rs",
                source_function: "tensile_stress_area",
            },

            Equation::PreloadTorque => EquationMetadata {
                name: "Preload Torque",
                description: "Tightening torque for a target bolt preload",
                formula_plain: "T = K * F * d",
                reference: SHIGLEY_FASTENERS,
                variables: vec![
                    Variable::new("K", "Torque coefficient", "-"),
                    Variable::new("F", "Preload", "N"),
                    Variable::new("d", "Nominal diameter", "mm"),
                ],
                assumptions: vec!["K ≈ 0.2 for unlubricated steel"],
                category: EquationCategory::Fasteners,
                source_module: "equations/fastener.rs",
                source_function: "preload_torque",
            },

            Equation::BoltTensileStress => EquationMetadata {
                name: "Bolt Tensile Stress",
                description: "Average tensile stress over the tensile stress area",
                formula_plain: "sigma = F / A_t",
                reference: SHIGLEY_FASTENERS,
                variables: vec![
                    Variable::new("F", "Axial force", "N"),
                    Variable::new("A_t", "Tensile stress area", "mm²"),
                ],
                assumptions: vec![],
                category: EquationCategory::Fasteners,
                source_module: "equations/fastener.rs",
                source_function: "bolt_tensile_stress",
            },

            // Linkages
            Equation::GrashofCondition => EquationMetadata {
                name: "Grashof Condition",
                description: "Existence of a fully rotating link in a four-bar linkage",
                formula_plain: "s + l <= p + q",
                reference: NORTON_GRASHOF,
                variables: vec![
                    Variable::new("s", "Shortest link", "length"),
                    Variable::new("l", "Longest link", "length"),
                    Variable::new("p, q", "Remaining links", "length"),
                ],
                assumptions: vec!["Planar four-bar with revolute joints"],
                category: EquationCategory::Linkages,
                source_module: "equations/linkage.rs",
                source_function: "grashof_condition",
            },

            Equation::DiagonalLength => EquationMetadata {
                name: "Four-Bar Diagonal",
                description: "Distance from the rocker pivot to the crank pin",
                formula_plain: "d^2 = g^2 + a^2 - 2 g a cos(theta)",
                reference: NORTON_TRANSMISSION,
                variables: vec![
                    Variable::new("g", "Ground length", "length"),
                    Variable::new("a", "Crank length", "length"),
                    Variable::new("theta", "Crank angle", "rad"),
                ],
                assumptions: vec![],
                category: EquationCategory::Linkages,
                source_module: "equations/linkage.rs",
                source_function: "diagonal_length",
            },

            Equation::TransmissionAngle => EquationMetadata {
                name: "Transmission Angle",
                description: "Angle between coupler and rocker",
                formula_plain: "cos(mu) = (b^2 + c^2 - d^2) / (2 b c)",
                reference: NORTON_TRANSMISSION,
                variables: vec![
                    Variable::new("b", "Coupler length", "length"),
                    Variable::new("c", "Rocker length", "length"),
                    Variable::new("mu", "Transmission angle", "deg"),
                ],
                assumptions: vec!["Extremes occur with crank collinear with ground"],
                category: EquationCategory::Linkages,
                source_module: "equations/linkage.rs",
                source_function: "transmission_angle",
            },
        }
    }

    /// Get all equations in a specific category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that have at least one equation, in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories: Vec<EquationCategory> = ALL_EQUATIONS
            .iter()
            .map(|eq| eq.metadata().category)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

/// Every registered equation, in documentation order.
pub static ALL_EQUATIONS: &[Equation] = &[
    // Spur gears
    Equation::GearRatio,
    Equation::PitchDiameter,
    Equation::CenterDistance,
    Equation::InternalCenterDistance,
    Equation::Addendum,
    Equation::Dedendum,
    Equation::OutsideDiameter,
    Equation::CircularPitch,
    Equation::OutputSpeed,
    Equation::OutputTorque,
    // Planetary
    Equation::PlanetaryRingTeeth,
    Equation::PlanetaryRingFixed,
    Equation::PlanetarySunFixed,
    Equation::PlanetaryCarrierFixed,
    // Belts
    Equation::BeltRatio,
    Equation::OpenBeltLength,
    Equation::BeltSpeed,
    // Chains
    Equation::SprocketPitchDiameter,
    Equation::ChainSpeed,
    Equation::ChainLength,
    // Shafts
    Equation::TorqueFromPower,
    Equation::PowerFromTorque,
    Equation::TorsionalShearStress,
    Equation::SolidShaftDiameter,
    // Bearings
    Equation::EquivalentDynamicLoad,
    Equation::BasicRatingLife,
    Equation::RatingLifeHours,
    Equation::RequiredDynamicCapacity,
    Equation::StaticSafetyFactor,
    // Springs
    Equation::SpringIndex,
    Equation::WahlFactor,
    Equation::SpringRate,
    Equation::SpringShearStress,
    // Flywheels
    Equation::KineticEnergy,
    Equation::CoefficientOfFluctuation,
    Equation::EnergyFluctuation,
    Equation::RequiredMomentOfInertia,
    // Fasteners
    Equation::TensileStressArea,
    Equation::PreloadTorque,
    Equation::BoltTensileStress,
    // Linkages
    Equation::GrashofCondition,
    Equation::DiagonalLength,
    Equation::TransmissionAngle,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation applied during a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// Which equation was used
    pub equation: Equation,
    /// Where it was applied (e.g., "Stage 2", "Crank aligned")
    pub context: String,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
///
/// Each calculation fills one of these and returns it with its result, so
/// every number can be traced back to the relation that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Whether an equation was recorded at least once
    pub fn contains(&self, equation: Equation) -> bool {
        self.usages.iter().any(|u| u.equation == equation)
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }

    /// Citations for every unique equation, e.g. "Basic Rating Life (ISO 281:2007)"
    pub fn citations(&self) -> Vec<String> {
        self.unique_equations()
            .into_iter()
            .map(|eq| {
                let meta = eq.metadata();
                format!("{} ({})", meta.name, meta.reference.citation())
            })
            .collect()
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md document listing every registered
/// equation, grouped by machine element.
///
/// # Example
///
/// ```rust
/// use mech_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Machina Equations Reference"));
/// assert!(markdown.contains("Planetary Gear Sets"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(32_000);

    output.push_str(r#"# Machina Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `machina equations --output EQUATIONS.md`

This document lists all mathematical formulas used in Machina calculations.
Each equation includes its formula, reference, source location, and assumptions.

## Conventions

| Quantity | Convention |
|----------|------------|
| Ratio | Input speed / output speed, always positive |
| Direction | +1 same sense as input, -1 reversed |
| Lengths | Millimetres unless noted |
| Forces | Newtons |
| Angles | Degrees in results, radians inside formulas |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(r#"## How to Audit

1. Find the equation you want to verify in the sections above
2. Check the **Reference** for the original source (Shigley, Norton, ISO)
3. Follow the **Source** link to the implementing function
4. Run `cargo test` to verify equations against known values
"#);

    output
}

// ============================================================================
// Tests
// ============================================================================
