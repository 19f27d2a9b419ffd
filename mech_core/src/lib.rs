//! # mech_core - Mechanical Design Calculation Engine
//!
//! `mech_core` is the computational heart of Machina: gear train composition,
//! four-bar linkage analysis and rolling bearing life, built on a catalog of
//! single-formula machine design equations. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Fail-fast**: Every input is range-checked before anything is computed
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Results carry the equations (and references) they used
//!
//! ## Quick Start
//!
//! ```rust
//! use mech_core::calculations::gear_train::{compose, GearStage, GearTrain};
//!
//! let train = GearTrain::new("Reducer").with_stage(GearStage::external(2.0, 20, 60));
//! let result = compose(&train).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("overall_ratio"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Gear train, linkage and bearing calculations
//! - [`equations`] - Formula catalog and equation registry
//! - [`settings`] - Advisory design thresholds (TOML)
//! - [`units`] - Type-safe unit wrappers and conversion constants
//! - [`validation`] - Physical range checks
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{MechError, MechResult};
pub use settings::DesignSettings;
