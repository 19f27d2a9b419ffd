//! # Design Settings
//!
//! Advisory thresholds applied on top of the hard feasibility checks. None
//! of these values changes whether a calculation succeeds; they only decide
//! which results get flagged.
//!
//! Settings are read from TOML:
//!
//! ```toml
//! transmission_angle_min_deg = 45.0
//! transmission_angle_max_deg = 135.0
//! default_mesh_efficiency = 0.97
//! ```
//!
//! Missing keys fall back to [`DesignSettings::default`].

use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};
use crate::validation::{EFFICIENCY_RANGE, LINK_ANGLE_RANGE_DEG};

/// Advisory thresholds for design checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignSettings {
    /// Transmission angles below this are flagged as poor (degrees)
    pub transmission_angle_min_deg: f64,

    /// Transmission angles above this are flagged as poor (degrees)
    pub transmission_angle_max_deg: f64,

    /// Efficiency assumed per gear mesh when none is given
    pub default_mesh_efficiency: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            transmission_angle_min_deg: 40.0,
            transmission_angle_max_deg: 140.0,
            default_mesh_efficiency: 0.98,
        }
    }
}

impl DesignSettings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(contents: &str) -> MechResult<Self> {
        let settings: DesignSettings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render as TOML (e.g. for `machina settings`).
    pub fn to_toml_string(&self) -> MechResult<String> {
        toml::to_string_pretty(self).map_err(MechError::serialization)
    }

    /// Validate threshold consistency.
    pub fn validate(&self) -> MechResult<()> {
        LINK_ANGLE_RANGE_DEG
            .check("transmission_angle_min_deg", self.transmission_angle_min_deg)
            .map_err(MechError::input)?;
        LINK_ANGLE_RANGE_DEG
            .check("transmission_angle_max_deg", self.transmission_angle_max_deg)
            .map_err(MechError::input)?;
        if self.transmission_angle_min_deg >= self.transmission_angle_max_deg {
            return Err(MechError::invalid_input(
                "transmission_angle_min_deg",
                self.transmission_angle_min_deg,
                format!(
                    "Must be below transmission_angle_max_deg ({})",
                    self.transmission_angle_max_deg
                ),
            ));
        }
        EFFICIENCY_RANGE
            .check("default_mesh_efficiency", self.default_mesh_efficiency)
            .map_err(MechError::input)?;
        Ok(())
    }

    /// Whether a transmission angle range should be flagged as poor.
    pub fn is_poor_transmission(&self, min_deg: f64, max_deg: f64) -> bool {
        min_deg < self.transmission_angle_min_deg || max_deg > self.transmission_angle_max_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = DesignSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.transmission_angle_min_deg, 40.0);
        assert_eq!(settings.transmission_angle_max_deg, 140.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = DesignSettings::from_toml_str("transmission_angle_min_deg = 45.0").unwrap();
        assert_eq!(settings.transmission_angle_min_deg, 45.0);
        assert_eq!(settings.transmission_angle_max_deg, 140.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DesignSettings::from_toml_str("transmision_angle_min_deg = 45.0").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let err = DesignSettings::from_toml_str(
            "transmission_angle_min_deg = 120.0\ntransmission_angle_max_deg = 60.0",
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_efficiency_bounds() {
        let settings = DesignSettings {
            default_mesh_efficiency: 1.2,
            ..DesignSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = DesignSettings::default();
        let toml = settings.to_toml_string().unwrap();
        let parsed = DesignSettings::from_toml_str(&toml).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_poor_transmission_flag() {
        let settings = DesignSettings::default();
        assert!(!settings.is_poor_transmission(40.0, 140.0));
        assert!(settings.is_poor_transmission(39.9, 100.0));
        assert!(settings.is_poor_transmission(60.0, 140.1));
    }
}
