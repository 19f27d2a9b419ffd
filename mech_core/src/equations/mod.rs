//! # Machine Design Equations
//!
//! Single-formula functions for each machine element, kept in one place so
//! they can be audited against their references. These are thin, unchecked
//! building blocks; input validation happens in [`crate::calculations`].
//!
//! ## Modules
//!
//! - [`gear`] - Spur gear geometry, ratios and planetary relations
//! - [`belt`] - Open belt drives
//! - [`chain`] - Roller chain drives
//! - [`shaft`] - Torque, power and torsional stress
//! - [`bearing`] - ISO 281 rating life
//! - [`spring`] - Helical compression springs
//! - [`flywheel`] - Flywheel energy and fluctuation
//! - [`fastener`] - Metric threaded fasteners
//! - [`linkage`] - Grashof condition and transmission angle
//! - [`registry`] - Equation metadata and usage tracking
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition
//! - Norton, Design of Machinery, 5th Edition
//! - ISO 281:2007, ISO 76:2006

pub mod bearing;
pub mod belt;
pub mod chain;
pub mod fastener;
pub mod flywheel;
pub mod gear;
pub mod linkage;
pub mod registry;
pub mod shaft;
pub mod spring;

// Re-export commonly used items
pub use gear::{
    gear_ratio,
    pitch_diameter,
    center_distance,
    internal_center_distance,
    addendum,
    dedendum,
    outside_diameter,
    circular_pitch,
    ring_teeth_for,
    planetary_ratio_ring_fixed,
    planetary_ratio_sun_fixed,
    planetary_ratio_carrier_fixed,
};

pub use belt::{belt_ratio, open_belt_length, belt_speed};

pub use spring::{spring_index, wahl_factor, spring_rate};

pub use bearing::{
    equivalent_dynamic_load,
    basic_rating_life,
    rating_life_hours,
    BALL_LIFE_EXPONENT,
    ROLLER_LIFE_EXPONENT,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
